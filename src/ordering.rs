//! Runs the builder and the sorter for one ordering request and assembles
//! the unit lists the surrounding build consumes.

use crate::analysis::topology::{self, UnitOrder};
use crate::error::CircularDependency;
use crate::graph::builder;
use crate::resolve::ReferenceResolver;
use crate::syntax::CompilationUnit;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Per-request settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingOptions {
    /// Keep declaration-only units in the emitted list. They always stay in
    /// the root order either way.
    pub emit_declaration_units: bool,
}

impl Default for OrderingOptions {
    fn default() -> Self {
        Self { emit_declaration_units: true }
    }
}

/// The outcome of a successful ordering request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedUnits {
    /// Dependency-first unit names to emit. Implicit roots are never included.
    pub emitted: Vec<String>,
    /// Every unit, in the same order, for the caller's root list.
    pub roots: Vec<String>,
}

/// Orders `units` for emission and rewrites `root_names` to match.
///
/// The dependency map and weights live only for the duration of this call.
/// On a cycle, `root_names` is left as it was and the cycle is returned.
pub fn reorder_units<'p, R: ReferenceResolver<'p>>(
    units: &'p [CompilationUnit],
    resolver: &R,
    root_names: &mut Vec<String>,
    options: &OrderingOptions,
) -> Result<SortedUnits, CircularDependency> {
    let dependencies = builder::build(units, resolver);
    let order = topology::sort(units, &dependencies)?;
    let sorted = assemble(units, &order, options);

    root_names.clone_from(&sorted.roots);
    info!(
        units = units.len(),
        edges = dependencies.edge_count(),
        emitted = sorted.emitted.len(),
        "units ordered"
    );
    Ok(sorted)
}

fn assemble(units: &[CompilationUnit], order: &UnitOrder, options: &OrderingOptions) -> SortedUnits {
    let mut sorted = SortedUnits::default();
    for id in order.units() {
        let Some(unit) = units.get(id.index()) else { continue };
        sorted.roots.push(unit.name.clone());
        if unit.is_implicit_root() {
            continue;
        }
        if unit.is_declaration_only() && !options.emit_declaration_units {
            continue;
        }
        sorted.emitted.push(unit.name.clone());
    }
    sorted
}
