//! The reference resolution seam.
//!
//! Symbol binding is owned by the semantic-analysis layer; the dependency
//! builder only asks "which unit declares what this node names?".
pub mod global;

pub use global::GlobalScopeResolver;

use crate::syntax::{ClassDecl, Expr, FunctionBody, UnitId};

/// What a reference resolved to. Bodies are handed out so the builder can
/// follow calls and instantiations into the declaring unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol<'p> {
    Value,
    Function(&'p FunctionBody),
    Class(&'p ClassDecl),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'p> {
    /// The unit declaring the referenced value.
    pub unit: UnitId,
    pub symbol: Symbol<'p>,
}

impl<'p> Resolution<'p> {
    pub fn value(unit: UnitId) -> Self {
        Self { unit, symbol: Symbol::Value }
    }
}

/// Maps a syntactic reference to its declaring unit.
///
/// Implementations must return `None` for anything declared in a
/// declaration-only unit; the builder does not re-check.
pub trait ReferenceResolver<'p> {
    fn resolve(&self, node: &Expr) -> Option<Resolution<'p>>;
}

impl<'p, F> ReferenceResolver<'p> for F
where
    F: Fn(&Expr) -> Option<Resolution<'p>>,
{
    fn resolve(&self, node: &Expr) -> Option<Resolution<'p>> {
        self(node)
    }
}
