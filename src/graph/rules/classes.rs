//! Class declarations and instantiations.
use crate::graph::builder::DependencyGraphBuilder;
use crate::resolve::ReferenceResolver;
use crate::syntax::{ClassDecl, ClassMember, Expr, Parameter, UnitId};
use tracing::debug;

impl<'p, 'r, R: ReferenceResolver<'p>> DependencyGraphBuilder<'p, 'r, R> {
    /// A class declared at top level reads its base class, its static field
    /// initializers and every decorator when the unit loads.
    pub(in crate::graph) fn visit_class_declaration(&mut self, owner: UnitId, decl: &'p ClassDecl) {
        if let Some(base) = &decl.extends {
            self.record_reference(owner, base);
        }
        for member in &decl.members {
            if let ClassMember::Property { is_static: true, initializer: Some(init), .. } = member {
                self.visit_expression(owner, init);
            }
        }
        for decorator in decorators(decl) {
            self.visit_expression(owner, decorator);
        }
    }

    /// `new C()` (or a call resolving to a class) runs the instance field
    /// initializers and the constructor, both owned by the class's unit.
    pub(in crate::graph) fn visit_instantiation(&mut self, unit: UnitId, decl: &'p ClassDecl) {
        if !self.visited_classes.insert(decl as *const ClassDecl) {
            return;
        }
        debug!(unit = self.unit_name(unit), class = decl.name.as_str(), "following instantiation");
        for member in &decl.members {
            if let ClassMember::Property { is_static: false, initializer: Some(init), .. } = member {
                self.visit_expression(unit, init);
            }
        }
        if let Some(constructor) = decl.constructor() {
            self.visit_top_level(unit, &constructor.statements);
        }
    }
}

/// Class, member, accessor and parameter decorators, in source order.
fn decorators(decl: &ClassDecl) -> impl Iterator<Item = &Expr> {
    let members = decl.members.iter().flat_map(|member| {
        let (own, parameters): (&[Expr], &[Parameter]) = match member {
            ClassMember::Property { decorators, .. } => (decorators.as_slice(), &[]),
            ClassMember::Method { decorators, body, .. } | ClassMember::Accessor { decorators, body, .. } => {
                (decorators.as_slice(), body.parameters.as_slice())
            }
            ClassMember::Constructor { body } => (&[], body.parameters.as_slice()),
        };
        own.iter().chain(parameters.iter().flat_map(|p| p.decorators.iter()))
    });
    decl.decorators.iter().chain(members)
}
