//! Expression forms.
//!
//! Only some of these are traversed by the dependency builder; the rest exist so
//! a unit tree can represent them faithfully (see `graph::rules::expressions`).

use super::stmt::{ClassDecl, FunctionBody};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A bare name, e.g. `helper`.
    Identifier { name: String },
    /// `object.property`. A chain of these rooted at an identifier is a
    /// dotted reference such as `NS.Config.load`.
    PropertyAccess { object: Box<Expr>, property: String },
    /// `object[index]`.
    ElementAccess { object: Box<Expr>, index: Box<Expr> },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// `new callee(arguments)`.
    New {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Object {
        #[serde(default)]
        members: Vec<ObjectMember>,
    },
    Array {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    /// A template literal; only the interpolated expressions are kept.
    Template {
        #[serde(default)]
        expressions: Vec<Expr>,
    },
    Paren { expression: Box<Expr> },
    Binary { operator: String, left: Box<Expr>, right: Box<Expr> },
    Unary {
        operator: String,
        operand: Box<Expr>,
        #[serde(default = "default_prefix")]
        prefix: bool,
    },
    Delete { operand: Box<Expr> },
    /// `function name(...) { ... }` in expression position.
    Function {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        body: FunctionBody,
    },
    Arrow {
        #[serde(default)]
        body: FunctionBody,
    },
    /// `typeof operand`.
    TypeOf { operand: Box<Expr> },
    Conditional { condition: Box<Expr>, when_true: Box<Expr>, when_false: Box<Expr> },
    Spread { argument: Box<Expr> },
    Class(Box<ClassDecl>),
    Await { argument: Box<Expr> },
    Yield {
        #[serde(default)]
        argument: Option<Box<Expr>>,
    },
    /// `<T>expression` or `expression as T`.
    TypeAssertion { expression: Box<Expr>, type_name: String },
    Literal { raw: String },
    This,
}

fn default_prefix() -> bool { true }

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectMember {
    /// `key: value`
    Property { key: String, value: Expr },
    /// `name` or `name = initializer`
    Shorthand {
        name: String,
        #[serde(default)]
        initializer: Option<Expr>,
    },
    /// `...argument`
    Spread { argument: Expr },
    /// `key() { ... }`
    Method {
        key: String,
        #[serde(default)]
        body: FunctionBody,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    /// Builds an identifier or property-access chain from dotted text.
    pub fn path(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let mut expr = Expr::ident(parts.next().unwrap_or_default());
        for part in parts {
            expr = Expr::PropertyAccess { object: Box::new(expr), property: part.to_string() };
        }
        expr
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call { callee: Box::new(callee), arguments }
    }

    pub fn new_instance(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::New { callee: Box::new(callee), arguments }
    }

    pub fn literal(raw: impl Into<String>) -> Self {
        Expr::Literal { raw: raw.into() }
    }

    pub fn paren(expression: Expr) -> Self {
        Expr::Paren { expression: Box::new(expression) }
    }

    pub fn binary(operator: &str, left: Expr, right: Expr) -> Self {
        Expr::Binary { operator: operator.to_string(), left: Box::new(left), right: Box::new(right) }
    }

    /// True for the forms a resolver can map to a declaration.
    pub fn is_reference(&self) -> bool {
        matches!(self, Expr::Identifier { .. } | Expr::PropertyAccess { .. })
    }

    /// The dotted text of an identifier chain (`A.b.c`), or `None` when the
    /// chain is rooted at anything other than an identifier.
    pub fn reference_path(&self) -> Option<String> {
        match self {
            Expr::Identifier { name } => Some(name.clone()),
            Expr::PropertyAccess { object, property } => {
                let mut path = object.reference_path()?;
                path.push('.');
                path.push_str(property);
                Some(path)
            }
            _ => None,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren { expression } = expr {
            expr = expression;
        }
        expr
    }
}
