//! Emission ordering for compilation units that share one global namespace.
//!
//! Nothing in the source enforces load order, so the order is inferred: the
//! [`graph`] builder reads each unit's top-level code and records which other
//! units it reads from at load time, and [`analysis::topology`] turns those
//! edges into a dependency-first order or reports the cycle that prevents one.
//!
//! Parsing and symbol binding belong to the caller; this crate consumes a
//! [`syntax`] tree and a [`resolve::ReferenceResolver`].

pub mod analysis;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod ordering;
pub mod resolve;
pub mod syntax;

pub use analysis::topology::{sort, UnitOrder, WeightMap, DECLARATION_WEIGHT};
pub use error::{CircularDependency, ManifestError};
pub use graph::{DependencyGraphBuilder, DependencyMap};
pub use manifest::Manifest;
pub use ordering::{reorder_units, OrderingOptions, SortedUnits};
pub use resolve::{GlobalScopeResolver, ReferenceResolver, Resolution, Symbol};
pub use syntax::{CompilationUnit, UnitId};
