//! dependency_map.rs
//! Deduplicated `dependent -> dependency` edges between units.

use crate::syntax::UnitId;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

/// Maps every unit to the set of units its top-level code reads from.
///
/// Backed by a `DiGraphMap`, so each ordered pair is stored once and a unit's
/// dependencies come back in the order they were first recorded. The sorter
/// relies on that order to report the same cycle on every run.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    graph: DiGraphMap<UnitId, ()>,
}

impl DependencyMap {
    pub fn new() -> Self { Self::default() }

    /// Records that `dependent` reads something `dependency` declares.
    /// Returns `false` for self edges and for pairs already present.
    pub fn add(&mut self, dependent: UnitId, dependency: UnitId) -> bool {
        if dependent == dependency || self.graph.contains_edge(dependent, dependency) {
            return false;
        }
        self.graph.add_edge(dependent, dependency, ());
        true
    }

    pub fn contains(&self, dependent: UnitId, dependency: UnitId) -> bool {
        self.graph.contains_edge(dependent, dependency)
    }

    /// Dependencies of `unit` in first-recorded order.
    pub fn dependencies_of(&self, unit: UnitId) -> impl Iterator<Item = UnitId> + '_ {
        self.graph.neighbors_directed(unit, Direction::Outgoing)
    }

    pub fn dependents_of(&self, unit: UnitId) -> impl Iterator<Item = UnitId> + '_ {
        self.graph.neighbors_directed(unit, Direction::Incoming)
    }

    pub fn has_dependencies(&self, unit: UnitId) -> bool {
        self.dependencies_of(unit).next().is_some()
    }

    /// Every unit that appears on either end of an edge.
    pub fn units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.graph.nodes()
    }

    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn is_empty(&self) -> bool { self.graph.edge_count() == 0 }

    /// All edges as `(dependent, dependency)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (UnitId, UnitId)> + '_ {
        self.graph.all_edges().map(|(from, to, _)| (from, to))
    }
}

impl FromIterator<(UnitId, UnitId)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (UnitId, UnitId)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (dependent, dependency) in iter {
            map.add(dependent, dependency);
        }
        map
    }
}
