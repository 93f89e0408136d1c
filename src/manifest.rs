//! A whole ordering request as JSON: units, explicit reference bindings and options.
//!
//! ```json
//! {
//!   "units": [{ "name": "a.ts", "statements": [...] }],
//!   "bindings": { "Vendor.init": "vendor.js" },
//!   "options": { "emit_declaration_units": false }
//! }
//! ```

use crate::error::{CircularDependency, ManifestError};
use crate::ordering::{reorder_units, OrderingOptions, SortedUnits};
use crate::resolve::GlobalScopeResolver;
use crate::syntax::CompilationUnit;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub units: Vec<CompilationUnit>,
    /// Reference path -> name of the unit that declares it. Overrides the
    /// global-scope index.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
    #[serde(default)]
    pub options: OrderingOptions,
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for unit in &self.units {
            if !seen.insert(unit.name.as_str()) {
                return Err(ManifestError::DuplicateUnit(unit.name.clone()));
            }
        }
        for (path, unit) in &self.bindings {
            if !seen.contains(unit.as_str()) {
                return Err(ManifestError::UnknownUnit { path: path.clone(), unit: unit.clone() });
            }
        }
        Ok(())
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.name.clone()).collect()
    }

    /// A resolver over this manifest's units with its bindings applied.
    pub fn resolver(&self) -> GlobalScopeResolver<'_> {
        let mut resolver = GlobalScopeResolver::new(&self.units);
        for (path, unit) in &self.bindings {
            if let Some(id) = resolver.unit_id(unit) {
                resolver.bind(path.clone(), id);
            }
        }
        resolver
    }

    /// Orders the manifest's units, starting from their listed order as roots.
    pub fn reorder(&self) -> Result<SortedUnits, CircularDependency> {
        let mut roots = self.unit_names();
        reorder_units(&self.units, &self.resolver(), &mut roots, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate_units() {
        let json = r#"{ "units": [{ "name": "a.ts" }, { "name": "a.ts" }] }"#;
        let err = Manifest::from_json(json).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateUnit(name) if name == "a.ts"));
    }

    #[test]
    fn test_rejects_bindings_to_unknown_units() {
        let json = r#"{ "units": [{ "name": "a.ts" }], "bindings": { "x": "b.ts" } }"#;
        let err = Manifest::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "binding 'x' names unknown unit 'b.ts'");
    }

    #[test]
    fn test_malformed_json() {
        let err = Manifest::from_json(r#"{ "units": [{ "name": 3 }] }"#).unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
    }

    #[test]
    fn test_bindings_create_edges() {
        // The vendor unit declares nothing the index can see; the binding supplies it.
        let json = r#"{
            "units": [
                { "name": "app.js", "statements": [
                    { "kind": "expression", "expression": { "kind": "call",
                        "callee": { "kind": "property_access", "object": { "kind": "identifier", "name": "Vendor" }, "property": "init" } } }
                ] },
                { "name": "vendor.js" }
            ],
            "bindings": { "Vendor.init": "vendor.js" }
        }"#;
        let manifest = Manifest::from_json(json).unwrap();
        let sorted = manifest.reorder().unwrap();
        assert_eq!(sorted.emitted, vec!["vendor.js", "app.js"]);
    }
}
