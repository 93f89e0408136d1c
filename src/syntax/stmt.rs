//! Statement and declaration forms.

use super::expr::Expr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Expression { expression: Expr },
    /// `var|let|const a = ..., b = ...;`
    Variable {
        declarations: Vec<VariableDeclarator>,
        #[serde(default)]
        ambient: bool,
    },
    /// `import name = target;` or an equivalent re-export of another entity.
    Alias {
        name: String,
        target: Expr,
        #[serde(default)]
        ambient: bool,
    },
    Function(FunctionDecl),
    Class(ClassDecl),
    /// A namespace / module block. Its body shares top-level semantics.
    Namespace {
        name: String,
        #[serde(default)]
        body: Vec<Statement>,
        #[serde(default)]
        ambient: bool,
    },
    /// Interfaces, type aliases and other shapes with no runtime value.
    TypeDeclaration { name: String },
    Block {
        #[serde(default)]
        body: Vec<Statement>,
    },
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        #[serde(default)]
        else_branch: Option<Box<Statement>>,
    },
    Loop {
        loop_kind: LoopKind,
        /// `for (var i = ...; ...)` or `for (const x of ...)` declarations.
        #[serde(default)]
        initializer: Option<Box<Statement>>,
        #[serde(default)]
        condition: Option<Expr>,
        body: Box<Statement>,
    },
    Try {
        #[serde(default)]
        block: Vec<Statement>,
        #[serde(default)]
        handler: Option<CatchClause>,
        #[serde(default)]
        finalizer: Option<Vec<Statement>>,
    },
    Switch {
        discriminant: Expr,
        #[serde(default)]
        cases: Vec<SwitchCase>,
    },
    Labeled { label: String, body: Box<Statement> },
    Debugger,
    Return {
        #[serde(default)]
        argument: Option<Expr>,
    },
    Throw { argument: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopKind {
    For,
    ForIn,
    ForOf,
    While,
    DoWhile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    #[serde(default)]
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// `None` for the `default:` clause.
    #[serde(default)]
    pub test: Option<Expr>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// Parameters and statements of anything callable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionBody {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub decorators: Vec<Expr>,
    #[serde(default)]
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub body: FunctionBody,
    #[serde(default)]
    pub ambient: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    /// The base class in `extends Base`.
    #[serde(default)]
    pub extends: Option<Expr>,
    /// Class-level decorators.
    #[serde(default)]
    pub decorators: Vec<Expr>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    #[serde(default)]
    pub ambient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMember {
    Property {
        name: String,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        initializer: Option<Expr>,
        #[serde(default)]
        decorators: Vec<Expr>,
    },
    Method {
        name: String,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        decorators: Vec<Expr>,
        #[serde(default)]
        body: FunctionBody,
    },
    Accessor {
        name: String,
        accessor: AccessorKind,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        decorators: Vec<Expr>,
        #[serde(default)]
        body: FunctionBody,
    },
    Constructor {
        #[serde(default)]
        body: FunctionBody,
    },
}

impl Statement {
    pub fn expr(expression: Expr) -> Self {
        Statement::Expression { expression }
    }

    /// A single-declarator variable statement.
    pub fn var(name: impl Into<String>, initializer: Option<Expr>) -> Self {
        Statement::Variable {
            declarations: vec![VariableDeclarator { name: name.into(), initializer }],
            ambient: false,
        }
    }

    /// Carries an explicit `declare` marker.
    pub fn is_ambient(&self) -> bool {
        match self {
            Statement::Variable { ambient, .. }
            | Statement::Alias { ambient, .. }
            | Statement::Namespace { ambient, .. } => *ambient,
            Statement::Function(decl) => decl.ambient,
            Statement::Class(decl) => decl.ambient,
            _ => false,
        }
    }
}

impl FunctionBody {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { parameters: Vec::new(), statements }
    }
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self { name: name.into(), body: FunctionBody::new(statements), ambient: false }
    }
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn extending(mut self, base: Expr) -> Self {
        self.extends = Some(base);
        self
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn constructor(&self) -> Option<&FunctionBody> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Constructor { body } => Some(body),
            _ => None,
        })
    }
}

impl ClassMember {
    pub fn field(name: impl Into<String>, is_static: bool, initializer: Option<Expr>) -> Self {
        ClassMember::Property { name: name.into(), is_static, initializer, decorators: Vec::new() }
    }

    pub fn is_static(&self) -> bool {
        match self {
            ClassMember::Property { is_static, .. }
            | ClassMember::Method { is_static, .. }
            | ClassMember::Accessor { is_static, .. } => *is_static,
            ClassMember::Constructor { .. } => false,
        }
    }
}
