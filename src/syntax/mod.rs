//! Defines the syntax tree the dependency builder walks.
//!
//! Parsing happens elsewhere; this is the narrow, closed view of a unit's
//! top-level surface. Every variant carries only the fields an ordering rule
//! needs, so unit trees can be written by hand (or as JSON) in tests.
pub mod expr;
pub mod stmt;

use serde::{Deserialize, Serialize};

// Re-export key types for convenient access
pub use expr::{Expr, ObjectMember};
pub use stmt::{
    AccessorKind, CatchClause, ClassDecl, ClassMember, FunctionBody, FunctionDecl, LoopKind,
    Parameter, Statement, SwitchCase, VariableDeclarator,
};

/// Position of a unit in the ordering request's input collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// One source file sharing the global namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Unique path or name of the unit (e.g. "src/a.ts").
    pub name: String,
    /// The unit only declares shapes (typings) and has no executable code.
    #[serde(default)]
    pub declaration_only: bool,
    /// The unit is an implicit root (e.g. the default library). It is ordered
    /// like any other unit but never emitted.
    #[serde(default)]
    pub no_default_lib: bool,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self { name: name.into(), statements, ..Default::default() }
    }

    pub fn declaration(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self { declaration_only: true, ..Self::new(name, statements) }
    }

    pub fn is_declaration_only(&self) -> bool { self.declaration_only }

    pub fn is_implicit_root(&self) -> bool { self.no_default_lib }
}
