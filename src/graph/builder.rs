//! builder.rs
//! Infers the dependency map from every executable unit's top-level code.
//!
//! The construct-specific rules live in `rules::{statements, expressions, classes}`
//! as further `impl` blocks on [`DependencyGraphBuilder`].

use super::dependency_map::DependencyMap;
use crate::resolve::{ReferenceResolver, Resolution};
use crate::syntax::{ClassDecl, CompilationUnit, Expr, FunctionBody, UnitId};
use std::collections::HashSet;
use tracing::debug;

/// Walks the top-level surface of a fixed set of units and records an edge
/// whenever code owned by one unit reads a value declared in another.
///
/// Edges are attributed to the unit that owns the syntax being walked. When a
/// top-level call is followed into a function declared in unit B, references
/// inside that body become edges of B, not of the caller.
pub struct DependencyGraphBuilder<'p, 'r, R> {
    pub(super) units: &'p [CompilationUnit],
    pub(super) resolver: &'r R,
    pub(super) map: DependencyMap,
    /// Function bodies already followed from a call site.
    pub(super) visited_bodies: HashSet<*const FunctionBody>,
    /// Classes whose instance initializers and constructor were already walked.
    pub(super) visited_classes: HashSet<*const ClassDecl>,
}

impl<'p, 'r, R: ReferenceResolver<'p>> DependencyGraphBuilder<'p, 'r, R> {
    pub fn new(units: &'p [CompilationUnit], resolver: &'r R) -> Self {
        Self {
            units,
            resolver,
            map: DependencyMap::new(),
            visited_bodies: HashSet::new(),
            visited_classes: HashSet::new(),
        }
    }

    /// Runs once over all units. Declaration-only units contribute no edges.
    pub fn build(mut self) -> DependencyMap {
        let units = self.units;
        for (i, unit) in units.iter().enumerate() {
            if unit.is_declaration_only() {
                continue;
            }
            self.visit_top_level(UnitId::new(i), &unit.statements);
        }
        debug!(units = units.len(), edges = self.map.edge_count(), "dependency map built");
        self.map
    }

    /// Resolves `node` and, if it names a value in another unit, records the edge.
    /// Unresolved references are not an error; they simply add nothing.
    pub(super) fn record_reference(&mut self, owner: UnitId, node: &Expr) -> Option<Resolution<'p>> {
        let resolution = self.resolver.resolve(node)?;
        self.add_edge(owner, resolution.unit);
        Some(resolution)
    }

    pub(super) fn add_edge(&mut self, dependent: UnitId, dependency: UnitId) {
        if self.map.add(dependent, dependency) {
            debug!(
                dependent = self.unit_name(dependent),
                dependency = self.unit_name(dependency),
                "recorded dependency"
            );
        }
    }

    pub(super) fn unit_name(&self, id: UnitId) -> &'p str {
        self.units.get(id.index()).map_or("<unknown>", |u| u.name.as_str())
    }
}

/// Builds the dependency map for `units` in one pass.
pub fn build<'p, R: ReferenceResolver<'p>>(units: &'p [CompilationUnit], resolver: &R) -> DependencyMap {
    DependencyGraphBuilder::new(units, resolver).build()
}
