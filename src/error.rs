//! Defines the error types for ordering requests and manifests.
use crate::syntax::{CompilationUnit, UnitId};
use thiserror::Error;

/// The one failure an ordering request reports: a chain of units that
/// depend on each other in a loop. The first and last entries are the same unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency: {}", .path.join(" -> "))]
pub struct CircularDependency {
    pub path: Vec<String>,
}

impl CircularDependency {
    pub fn from_path(units: &[CompilationUnit], path: &[UnitId]) -> Self {
        let path = path
            .iter()
            .map(|id| units.get(id.index()).map_or_else(|| format!("#{}", id.0), |u| u.name.clone()))
            .collect();
        Self { path }
    }

    /// The distinct units on the cycle, without the closing repeat.
    pub fn members(&self) -> &[String] {
        match self.path.split_last() {
            Some((_, members)) => members,
            None => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binding '{path}' names unknown unit '{unit}'")]
    UnknownUnit { path: String, unit: String },
    #[error("unit '{0}' appears more than once")]
    DuplicateUnit(String),
}
