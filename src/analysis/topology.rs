use crate::error::CircularDependency;
use crate::graph::DependencyMap;
use crate::syntax::{CompilationUnit, UnitId};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// Weight pinned on declaration-only units. Larger than any chain the
/// propagation can produce, so they always count as already satisfied.
pub const DECLARATION_WEIGHT: u32 = u32::MAX;

type Path = SmallVec<[UnitId; 8]>;

/// Longest outgoing dependency chain per unit, built fresh for each sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightMap {
    weights: Vec<Option<u32>>,
}

impl WeightMap {
    fn with_units(count: usize) -> Self {
        Self { weights: vec![None; count] }
    }

    pub fn get(&self, unit: UnitId) -> Option<u32> {
        self.weights.get(unit.index()).copied().flatten()
    }

    /// Raises the weight of `unit` to `weight`. Returns `false` when the unit
    /// already carries at least that weight, or is not part of the request.
    fn raise(&mut self, unit: UnitId, weight: u32) -> bool {
        match self.weights.get_mut(unit.index()) {
            Some(Some(current)) if *current >= weight => false,
            Some(slot) => {
                *slot = Some(weight);
                true
            }
            None => false,
        }
    }
}

/// A successful sort: every unit, heaviest first, which places each unit
/// after everything it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOrder {
    units: Vec<UnitId>,
    weights: WeightMap,
}

impl UnitOrder {
    pub fn units(&self) -> &[UnitId] { &self.units }

    pub fn weight_of(&self, unit: UnitId) -> Option<u32> { self.weights.get(unit) }

    pub fn into_units(self) -> Vec<UnitId> { self.units }
}

/// Orders `units` so dependencies come first, or reports the first cycle found.
///
/// Each unit without a weight seeds a depth-first propagation: a unit reached
/// through `n` edges is raised to weight `n`, and its dependencies to `n + 1`.
/// A dependency already on the current path closes a cycle and aborts the sort.
/// Units are then stably sorted by descending weight, so independent units keep
/// their input order.
///
/// Units are visited in input order and edges in recording order, which fixes
/// which cycle gets reported when there are several.
pub fn sort(units: &[CompilationUnit], dependencies: &DependencyMap) -> Result<UnitOrder, CircularDependency> {
    let mut weights = WeightMap::with_units(units.len());

    for (i, unit) in units.iter().enumerate() {
        if unit.is_declaration_only() {
            weights.raise(UnitId::new(i), DECLARATION_WEIGHT);
        }
    }

    for i in 0..units.len() {
        let root = UnitId::new(i);
        if weights.get(root).is_some() {
            continue;
        }
        if let Err(path) = propagate(root, dependencies, &mut weights) {
            let cycle = CircularDependency::from_path(units, &path);
            warn!(cycle = %cycle, "dependency cycle prevents ordering");
            return Err(cycle);
        }
    }

    let mut order: Vec<UnitId> = (0..units.len()).map(UnitId::new).collect();
    // `sort_by` is stable: equal weights keep input order.
    order.sort_by(|a, b| weights.get(*b).cmp(&weights.get(*a)));

    debug!(units = order.len(), "weights propagated");
    Ok(UnitOrder { units: order, weights })
}

struct Frame {
    unit: UnitId,
    weight: u32,
    dependencies: SmallVec<[UnitId; 4]>,
    cursor: usize,
}

/// Depth-first weight propagation from `root`, driven by an explicit stack so
/// long dependency chains cannot exhaust the call stack.
///
/// The frames on the stack are exactly the current path: a unit only gets a
/// frame while its dependencies are being walked. On a cycle the path is
/// returned from where the loop starts, closed by the repeated unit.
fn propagate(root: UnitId, dependencies: &DependencyMap, weights: &mut WeightMap) -> Result<(), Path> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut on_path = vec![false; weights.weights.len()];
    enter(root, 0, dependencies, weights, &mut stack, &mut on_path);

    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.dependencies.get(frame.cursor) else {
            on_path[frame.unit.index()] = false;
            stack.pop();
            continue;
        };
        frame.cursor += 1;
        let weight = frame.weight + 1;

        if on_path.get(next.index()).copied().unwrap_or(false) {
            let start = stack.iter().position(|f| f.unit == next).unwrap_or(0);
            let mut path: Path = stack[start..].iter().map(|f| f.unit).collect();
            path.push(next);
            return Err(path);
        }
        enter(next, weight, dependencies, weights, &mut stack, &mut on_path);
    }
    Ok(())
}

fn enter(
    unit: UnitId,
    weight: u32,
    dependencies: &DependencyMap,
    weights: &mut WeightMap,
    stack: &mut Vec<Frame>,
    on_path: &mut [bool],
) {
    // Already at least this deep: nothing below can change.
    if !weights.raise(unit, weight) {
        return;
    }
    trace!(unit = unit.0, weight, "raised weight");

    let dependencies: SmallVec<[UnitId; 4]> = dependencies.dependencies_of(unit).collect();
    if dependencies.is_empty() {
        return;
    }
    on_path[unit.index()] = true;
    stack.push(Frame { unit, weight, dependencies, cursor: 0 });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(names: &[&str]) -> Vec<CompilationUnit> {
        names.iter().map(|n| CompilationUnit::new(*n, vec![])).collect()
    }

    fn map(edges: &[(u32, u32)]) -> DependencyMap {
        edges.iter().map(|&(a, b)| (UnitId(a), UnitId(b))).collect()
    }

    fn names(units: &[CompilationUnit], order: &UnitOrder) -> Vec<String> {
        order.units().iter().map(|id| units[id.index()].name.clone()).collect()
    }

    #[test]
    fn test_sort_diamond_dependency() {
        // Shape: D -> B, D -> C, B -> A, C -> A
        let units = units(&["D", "B", "C", "A"]);
        let deps = map(&[(0, 1), (0, 2), (1, 3), (2, 3)]);

        let res = sort(&units, &deps).expect("Sort failed");

        let pos = |id: u32| res.units().iter().position(|&x| x == UnitId(id)).unwrap();
        assert!(pos(3) < pos(1));
        assert!(pos(3) < pos(2));
        assert!(pos(1) < pos(0));
        assert!(pos(2) < pos(0));
        assert_eq!(names(&units, &res), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_weights_are_longest_chains() {
        // 0 -> 1 -> 2 and 0 -> 2: unit 2 must sit below both.
        let units = units(&["top", "mid", "leaf"]);
        let res = sort(&units, &map(&[(0, 2), (0, 1), (1, 2)])).unwrap();

        assert_eq!(res.weight_of(UnitId(0)), Some(0));
        assert_eq!(res.weight_of(UnitId(1)), Some(1));
        assert_eq!(res.weight_of(UnitId(2)), Some(2));
    }

    #[test]
    fn test_late_root_raises_existing_weights() {
        // Unit 1 is weighted first (as a root), then pushed deeper by unit 2.
        let units = units(&["leaf", "mid", "top"]);
        let res = sort(&units, &map(&[(1, 0), (2, 1)])).unwrap();

        assert_eq!(res.weight_of(UnitId(0)), Some(2));
        assert_eq!(names(&units, &res), vec!["leaf", "mid", "top"]);
    }

    #[test]
    fn test_independent_units_keep_input_order() {
        let units = units(&["z.ts", "a.ts", "m.ts"]);
        let res = sort(&units, &DependencyMap::new()).unwrap();
        assert_eq!(names(&units, &res), vec!["z.ts", "a.ts", "m.ts"]);
    }

    #[test]
    fn test_cycle_detection_explicit() {
        // A -> B -> C -> A
        let units = units(&["A", "B", "C"]);
        let err = sort(&units, &map(&[(0, 1), (1, 2), (2, 0)])).unwrap_err();

        assert_eq!(err.path, vec!["A", "B", "C", "A"]);
        assert_eq!(err.path.first(), err.path.last());
    }

    #[test]
    fn test_cycle_path_starts_at_the_loop() {
        // entry -> B -> C -> B: entry is not part of the loop.
        let units = units(&["entry", "B", "C"]);
        let err = sort(&units, &map(&[(0, 1), (1, 2), (2, 1)])).unwrap_err();
        assert_eq!(err.path, vec!["B", "C", "B"]);
    }

    #[test]
    fn test_first_cycle_in_visit_order_is_reported() {
        // Two disjoint loops; the one reachable from the first unit wins.
        let units = units(&["p", "q", "r", "s"]);
        let err = sort(&units, &map(&[(2, 3), (3, 2), (0, 1), (1, 0)])).unwrap_err();
        assert_eq!(err.path, vec!["p", "q", "p"]);
    }

    #[test]
    fn test_declaration_units_do_not_constrain_order() {
        let mut units = units(&["app.ts", "lib.d.ts", "util.ts"]);
        units[1].declaration_only = true;
        // Even an explicit edge into the declaration unit is already satisfied.
        let res = sort(&units, &map(&[(0, 1), (1, 2)])).unwrap();

        assert_eq!(res.weight_of(UnitId(1)), Some(DECLARATION_WEIGHT));
        assert_eq!(res.weight_of(UnitId(0)), Some(0));
        // Declaration units are never traversed, so their own edges are inert.
        assert_eq!(res.weight_of(UnitId(2)), Some(0));
        assert_eq!(names(&units, &res), vec!["lib.d.ts", "app.ts", "util.ts"]);
    }

    #[test]
    fn test_unknown_units_are_ignored() {
        let units = units(&["a", "b"]);
        let res = sort(&units, &map(&[(0, 9), (1, 0)])).unwrap();
        assert_eq!(names(&units, &res), vec!["a", "b"]);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let count = 20_000u32;
        let units: Vec<_> = (0..count).map(|i| CompilationUnit::new(format!("u{}.ts", i), vec![])).collect();
        let deps = map(&(0..count - 1).map(|i| (i, i + 1)).collect::<Vec<_>>());

        let res = sort(&units, &deps).unwrap();
        assert_eq!(res.units().first(), Some(&UnitId(count - 1)));
        assert_eq!(res.units().last(), Some(&UnitId(0)));
    }
}
