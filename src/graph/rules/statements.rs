//! Statement-level rules.
use crate::graph::builder::DependencyGraphBuilder;
use crate::resolve::ReferenceResolver;
use crate::syntax::{Statement, UnitId, VariableDeclarator};
use smallvec::SmallVec;

impl<'p, 'r, R: ReferenceResolver<'p>> DependencyGraphBuilder<'p, 'r, R> {
    /// Applies the top-level rules to a statement list. Also used for function
    /// and constructor bodies followed from a call site.
    pub(in crate::graph) fn visit_top_level(&mut self, owner: UnitId, statements: &'p [Statement]) {
        for statement in statements {
            // `declare ...` contributes nothing and is not entered.
            if statement.is_ambient() {
                continue;
            }
            match statement {
                Statement::Expression { expression } => self.visit_expression(owner, expression),
                Statement::Variable { declarations, .. } => self.visit_initializers(owner, declarations),
                Statement::Alias { target, .. } => {
                    self.record_reference(owner, target);
                }
                Statement::Class(decl) => self.visit_class_declaration(owner, decl),
                Statement::Namespace { body, .. } => self.visit_top_level(owner, body),
                // Hoisted declarations and shapes run nothing at load time.
                Statement::Function(_) | Statement::TypeDeclaration { .. } => {}
                Statement::Return { .. } | Statement::Throw { .. } => {}
                compound => self.visit_nested(owner, compound),
            }
        }
    }

    /// Structural walk of a compound statement: every nested variable
    /// declaration and expression statement, at any depth. Conditions, loop
    /// tests and switch discriminants are expressions, not statements, and are
    /// not part of this walk.
    fn visit_nested(&mut self, owner: UnitId, statement: &'p Statement) {
        for child in nested_statements(statement) {
            match child {
                Statement::Variable { declarations, ambient: false } => self.visit_initializers(owner, declarations),
                Statement::Expression { expression } => self.visit_expression(owner, expression),
                other => self.visit_nested(owner, other),
            }
        }
    }

    fn visit_initializers(&mut self, owner: UnitId, declarations: &'p [VariableDeclarator]) {
        for decl in declarations {
            if let Some(init) = &decl.initializer {
                self.visit_expression(owner, init);
            }
        }
    }
}

/// Direct child statements of a statement. Class members are not statements.
fn nested_statements(statement: &Statement) -> SmallVec<[&Statement; 4]> {
    let mut children = SmallVec::new();
    match statement {
        Statement::Block { body } | Statement::Namespace { body, .. } => children.extend(body.iter()),
        Statement::Function(decl) => children.extend(decl.body.statements.iter()),
        Statement::If { then_branch, else_branch, .. } => {
            children.push(then_branch.as_ref());
            if let Some(else_branch) = else_branch {
                children.push(else_branch.as_ref());
            }
        }
        Statement::Loop { initializer, body, .. } => {
            if let Some(init) = initializer {
                children.push(init.as_ref());
            }
            children.push(body.as_ref());
        }
        Statement::Try { block, handler, finalizer } => {
            children.extend(block.iter());
            if let Some(handler) = handler {
                children.extend(handler.body.iter());
            }
            if let Some(finalizer) = finalizer {
                children.extend(finalizer.iter());
            }
        }
        Statement::Switch { cases, .. } => {
            for case in cases {
                children.extend(case.body.iter());
            }
        }
        Statement::Labeled { body, .. } => children.push(body.as_ref()),
        _ => {}
    }
    children
}
