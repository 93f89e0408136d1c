//! The dependency graph between compilation units and the builder that infers it.
pub mod builder;
pub mod dependency_map;
mod rules {
    pub mod classes;
    pub mod expressions;
    pub mod statements;
}

// Re-export key types for convenient access
pub use builder::DependencyGraphBuilder;
pub use dependency_map::DependencyMap;
