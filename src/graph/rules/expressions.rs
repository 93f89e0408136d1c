//! Expression-level rules.
//!
//! Traversed: identifiers and property-access chains (resolved as references),
//! calls and `new`, object and array literals, template interpolations,
//! element access (object side only), parenthesized, binary, unary and `delete`.
//!
//! Everything else (function and arrow expressions that are not called on the
//! spot, `typeof`, conditionals, spread elements, class expressions, `await`,
//! `yield`, type assertions) is deliberately left untraversed. References in
//! those forms never produce edges, and existing orderings depend on that.

use crate::graph::builder::DependencyGraphBuilder;
use crate::resolve::{ReferenceResolver, Symbol};
use crate::syntax::{Expr, FunctionBody, ObjectMember, UnitId};
use tracing::debug;

impl<'p, 'r, R: ReferenceResolver<'p>> DependencyGraphBuilder<'p, 'r, R> {
    pub(in crate::graph) fn visit_expression(&mut self, owner: UnitId, expr: &'p Expr) {
        match expr {
            Expr::Identifier { .. } | Expr::PropertyAccess { .. } => {
                self.record_reference(owner, expr);
            }
            Expr::Call { callee, arguments } | Expr::New { callee, arguments } => {
                self.visit_invocation(owner, callee, arguments)
            }
            Expr::Object { members } => {
                for member in members {
                    match member {
                        ObjectMember::Property { value, .. } => self.visit_expression(owner, value),
                        ObjectMember::Shorthand { initializer: Some(init), .. } => self.visit_expression(owner, init),
                        ObjectMember::Spread { argument } => self.visit_expression(owner, argument),
                        ObjectMember::Shorthand { initializer: None, .. } | ObjectMember::Method { .. } => {}
                    }
                }
            }
            // The computed key is not a reference.
            Expr::ElementAccess { object, .. } => {
                self.record_reference(owner, object);
            }
            Expr::Array { elements: items } | Expr::Template { expressions: items } => {
                for item in items {
                    self.visit_expression(owner, item);
                }
            }
            Expr::Paren { expression } => self.visit_expression(owner, expression),
            Expr::Binary { left, right, .. } => {
                self.visit_expression(owner, left);
                self.visit_expression(owner, right);
            }
            Expr::Unary { operand, .. } | Expr::Delete { operand } => self.visit_expression(owner, operand),
            Expr::Function { .. }
            | Expr::Arrow { .. }
            | Expr::TypeOf { .. }
            | Expr::Conditional { .. }
            | Expr::Spread { .. }
            | Expr::Class(_)
            | Expr::Await { .. }
            | Expr::Yield { .. }
            | Expr::TypeAssertion { .. }
            | Expr::Literal { .. }
            | Expr::This => {}
        }
    }

    /// Arguments first, then whatever the callee turns out to be.
    fn visit_invocation(&mut self, owner: UnitId, callee: &'p Expr, arguments: &'p [Expr]) {
        for argument in arguments {
            self.visit_expression(owner, argument);
        }

        match callee.unparenthesized() {
            // `(function () { ... })()` runs its body right here.
            Expr::Function { body, .. } | Expr::Arrow { body } => self.visit_top_level(owner, &body.statements),
            target if target.is_reference() => {
                let Some(resolution) = self.record_reference(owner, target) else {
                    return;
                };
                match resolution.symbol {
                    Symbol::Function(body) => self.visit_called_body(resolution.unit, body),
                    Symbol::Class(decl) => self.visit_instantiation(resolution.unit, decl),
                    Symbol::Value => {}
                }
            }
            _ => {}
        }
    }

    /// Follows a call into the callee's body, which is walked as top-level code
    /// of the unit declaring it. Each body is walked once per build.
    fn visit_called_body(&mut self, unit: UnitId, body: &'p FunctionBody) {
        if !self.visited_bodies.insert(body as *const FunctionBody) {
            return;
        }
        debug!(unit = self.unit_name(unit), statements = body.statements.len(), "following call into function body");
        self.visit_top_level(unit, &body.statements);
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::builder::build;
    use crate::resolve::GlobalScopeResolver;
    use crate::syntax::{
        ClassDecl, CompilationUnit, Expr, FunctionBody, FunctionDecl, ObjectMember, Statement, UnitId,
    };
    use rstest::rstest;

    /// Unit 0 evaluates `expr` at top level; unit 1 declares `dep`, `helper()` and `Widget`.
    fn depends_on_provider(expr: Expr) -> bool {
        let units = vec![
            CompilationUnit::new("main.ts", vec![Statement::expr(expr)]),
            CompilationUnit::new(
                "provider.ts",
                vec![
                    Statement::var("dep", Some(Expr::literal("0"))),
                    Statement::Function(FunctionDecl::new("helper", vec![])),
                    Statement::Class(ClassDecl::new("Widget")),
                ],
            ),
        ];
        let resolver = GlobalScopeResolver::new(&units);
        build(&units, &resolver).contains(UnitId(0), UnitId(1))
    }

    fn dep() -> Expr { Expr::ident("dep") }

    fn boxed(expr: Expr) -> Box<Expr> { Box::new(expr) }

    fn body_reading_dep() -> FunctionBody { FunctionBody::new(vec![Statement::expr(dep())]) }

    #[rstest]
    #[case::identifier(dep(), true)]
    #[case::property_chain(Expr::path("dep.length"), true)]
    #[case::unresolved(Expr::path("console.log"), false)]
    #[case::call_of_function(Expr::call(Expr::ident("helper"), vec![]), true)]
    #[case::call_argument(Expr::call(Expr::path("console.log"), vec![dep()]), true)]
    #[case::new_of_class(Expr::new_instance(Expr::ident("Widget"), vec![]), true)]
    #[case::new_argument(Expr::new_instance(Expr::ident("Map"), vec![dep()]), true)]
    #[case::object_property(Expr::Object { members: vec![ObjectMember::Property { key: "k".into(), value: dep() }] }, true)]
    #[case::object_shorthand_initializer(
        Expr::Object { members: vec![ObjectMember::Shorthand { name: "k".into(), initializer: Some(dep()) }] },
        true
    )]
    #[case::object_spread(Expr::Object { members: vec![ObjectMember::Spread { argument: dep() }] }, true)]
    #[case::object_method_body(
        Expr::Object { members: vec![ObjectMember::Method { key: "m".into(), body: body_reading_dep() }] },
        false
    )]
    #[case::element_access_object(Expr::ElementAccess { object: boxed(dep()), index: boxed(Expr::literal("0")) }, true)]
    #[case::element_access_key(Expr::ElementAccess { object: boxed(Expr::ident("table")), index: boxed(dep()) }, false)]
    #[case::array(Expr::Array { elements: vec![Expr::literal("1"), dep()] }, true)]
    #[case::template(Expr::Template { expressions: vec![dep()] }, true)]
    #[case::paren(Expr::paren(dep()), true)]
    #[case::binary_left(Expr::binary("+", dep(), Expr::literal("1")), true)]
    #[case::binary_right(Expr::binary("=", Expr::ident("local"), dep()), true)]
    #[case::unary(Expr::Unary { operator: "!".into(), operand: boxed(dep()), prefix: true }, true)]
    #[case::postfix(Expr::Unary { operator: "++".into(), operand: boxed(dep()), prefix: false }, true)]
    #[case::delete(Expr::Delete { operand: boxed(Expr::path("dep.field")) }, true)]
    #[case::iife(Expr::call(Expr::paren(Expr::Function { name: None, body: body_reading_dep() }), vec![]), true)]
    #[case::called_arrow(Expr::call(Expr::Arrow { body: body_reading_dep() }, vec![]), true)]
    #[case::uncalled_function(Expr::Function { name: None, body: body_reading_dep() }, false)]
    #[case::uncalled_arrow(Expr::Arrow { body: body_reading_dep() }, false)]
    #[case::type_of(Expr::TypeOf { operand: boxed(dep()) }, false)]
    #[case::conditional(
        Expr::Conditional { condition: boxed(dep()), when_true: boxed(dep()), when_false: boxed(dep()) },
        false
    )]
    #[case::spread(Expr::Spread { argument: boxed(dep()) }, false)]
    #[case::class_expression(Expr::Class(Box::new(ClassDecl::new("Anon").extending(Expr::ident("Widget")))), false)]
    #[case::await_(Expr::Await { argument: boxed(dep()) }, false)]
    #[case::yield_(Expr::Yield { argument: Some(boxed(dep())) }, false)]
    #[case::type_assertion(Expr::TypeAssertion { expression: boxed(dep()), type_name: "number".into() }, false)]
    #[case::this(Expr::This, false)]
    fn test_expression_rules(#[case] expr: Expr, #[case] expected: bool) {
        assert_eq!(depends_on_provider(expr), expected);
    }

    #[test]
    fn test_call_through_result_is_not_followed() {
        // helper()() : the outer callee is a call, not a reference.
        let expr = Expr::call(Expr::call(Expr::ident("helper"), vec![]), vec![]);
        assert!(!depends_on_provider(expr));
    }
}
