//! Name resolution over one shared global namespace.

use super::{ReferenceResolver, Resolution, Symbol};
use crate::syntax::{ClassMember, CompilationUnit, Expr, Statement, UnitId};
use std::collections::HashMap;

/// Resolves identifier and property-access chains against the qualified names
/// every executable unit declares at its top level.
///
/// Lookup order:
/// 1. explicit bindings added with [`GlobalScopeResolver::bind`],
/// 2. an exact qualified-name match (`NS.helper`),
/// 3. the longest declared prefix of the chain, which always yields a plain
///    value (`Foo.create()` on class `Foo` reads `Foo`, it does not construct it).
#[derive(Debug, Clone)]
pub struct GlobalScopeResolver<'p> {
    units: &'p [CompilationUnit],
    symbols: HashMap<String, Resolution<'p>>,
    bindings: HashMap<String, UnitId>,
}

impl<'p> GlobalScopeResolver<'p> {
    pub fn new(units: &'p [CompilationUnit]) -> Self {
        let mut resolver = Self { units, symbols: HashMap::new(), bindings: HashMap::new() };
        for (i, unit) in units.iter().enumerate() {
            // Declaration-only units never satisfy a reference.
            if unit.is_declaration_only() {
                continue;
            }
            resolver.index_statements(UnitId::new(i), "", &unit.statements);
        }
        resolver
    }

    /// Forces `path` to resolve into `unit`, overriding the index.
    pub fn bind(&mut self, path: impl Into<String>, unit: UnitId) -> &mut Self {
        self.bindings.insert(path.into(), unit);
        self
    }

    pub fn unit_id(&self, name: &str) -> Option<UnitId> {
        self.units.iter().position(|u| u.name == name).map(UnitId::new)
    }

    pub fn symbol_count(&self) -> usize { self.symbols.len() }

    fn index_statements(&mut self, unit: UnitId, prefix: &str, statements: &'p [Statement]) {
        for statement in statements {
            if statement.is_ambient() {
                continue;
            }
            match statement {
                Statement::Variable { declarations, .. } => {
                    for decl in declarations {
                        self.declare(qualify(prefix, &decl.name), unit, Symbol::Value);
                    }
                }
                Statement::Alias { name, .. } => {
                    self.declare(qualify(prefix, name), unit, Symbol::Value);
                }
                Statement::Function(decl) => {
                    self.declare(qualify(prefix, &decl.name), unit, Symbol::Function(&decl.body));
                }
                Statement::Class(decl) => {
                    let class_name = qualify(prefix, &decl.name);
                    for member in &decl.members {
                        if let ClassMember::Method { name, is_static: true, body, .. } = member {
                            self.declare(qualify(&class_name, name), unit, Symbol::Function(body));
                        }
                    }
                    self.declare(class_name, unit, Symbol::Class(decl));
                }
                Statement::Namespace { name, body, .. } => {
                    let ns_name = qualify(prefix, name);
                    self.index_statements(unit, &ns_name, body);
                    self.declare(ns_name, unit, Symbol::Value);
                }
                _ => {}
            }
        }
    }

    fn declare(&mut self, name: String, unit: UnitId, symbol: Symbol<'p>) {
        // First declaration in input order wins.
        self.symbols.entry(name).or_insert(Resolution { unit, symbol });
    }

    fn lookup(&self, path: &str) -> Option<Resolution<'p>> {
        if let Some(&unit) = self.bindings.get(path) {
            if self.units.get(unit.index()).map_or(true, |u| u.is_declaration_only()) {
                return None;
            }
            return match self.symbols.get(path) {
                Some(res) if res.unit == unit => Some(*res),
                _ => Some(Resolution::value(unit)),
            };
        }
        if let Some(res) = self.symbols.get(path) {
            return Some(*res);
        }

        let mut end = path.len();
        while let Some(dot) = path[..end].rfind('.') {
            end = dot;
            if let Some(res) = self.symbols.get(&path[..end]) {
                return Some(Resolution::value(res.unit));
            }
        }
        None
    }
}

impl<'p> ReferenceResolver<'p> for GlobalScopeResolver<'p> {
    fn resolve(&self, node: &Expr) -> Option<Resolution<'p>> {
        let path = node.reference_path()?;
        self.lookup(&path)
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_string() } else { format!("{}.{}", prefix, name) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ClassDecl, FunctionDecl};

    fn units() -> Vec<CompilationUnit> {
        vec![
            CompilationUnit::new("a.ts", vec![Statement::var("config", Some(Expr::literal("1")))]),
            CompilationUnit::new(
                "b.ts",
                vec![Statement::Namespace {
                    name: "Util".into(),
                    body: vec![Statement::Function(FunctionDecl::new("boot", vec![]))],
                    ambient: false,
                }],
            ),
            CompilationUnit::new(
                "c.ts",
                vec![Statement::Class(ClassDecl::new("Widget").with_member(ClassMember::Method {
                    name: "create".into(),
                    is_static: true,
                    decorators: vec![],
                    body: Default::default(),
                }))],
            ),
            CompilationUnit::declaration("lib.d.ts", vec![Statement::var("window", None)]),
        ]
    }

    #[test]
    fn test_resolves_qualified_names() {
        let units = units();
        let resolver = GlobalScopeResolver::new(&units);

        assert_eq!(resolver.resolve(&Expr::path("config")), Some(Resolution::value(UnitId(0))));
        let boot = resolver.resolve(&Expr::path("Util.boot")).unwrap();
        assert_eq!(boot.unit, UnitId(1));
        assert!(matches!(boot.symbol, Symbol::Function(_)));
        assert!(matches!(resolver.resolve(&Expr::path("Widget")).unwrap().symbol, Symbol::Class(_)));
        assert!(matches!(resolver.resolve(&Expr::path("Widget.create")).unwrap().symbol, Symbol::Function(_)));
    }

    #[test]
    fn test_prefix_match_is_a_plain_value() {
        let units = units();
        let resolver = GlobalScopeResolver::new(&units);

        let res = resolver.resolve(&Expr::path("Widget.instance.render")).unwrap();
        assert_eq!(res, Resolution::value(UnitId(2)));
        assert_eq!(resolver.resolve(&Expr::path("console.log")), None);
    }

    #[test]
    fn test_declaration_units_never_resolve() {
        let units = units();
        let mut resolver = GlobalScopeResolver::new(&units);
        assert_eq!(resolver.resolve(&Expr::path("window")), None);

        resolver.bind("document", UnitId(3));
        assert_eq!(resolver.resolve(&Expr::path("document")), None);
    }

    #[test]
    fn test_bindings_override_the_index() {
        let units = units();
        let mut resolver = GlobalScopeResolver::new(&units);
        resolver.bind("config", UnitId(1));
        assert_eq!(resolver.resolve(&Expr::path("config")), Some(Resolution::value(UnitId(1))));
        assert_eq!(resolver.unit_id("c.ts"), Some(UnitId(2)));
    }

    #[test]
    fn test_ambient_declarations_are_not_indexed() {
        let units = vec![CompilationUnit::new(
            "a.ts",
            vec![Statement::Variable {
                declarations: vec![crate::syntax::VariableDeclarator { name: "g".into(), initializer: None }],
                ambient: true,
            }],
        )];
        let resolver = GlobalScopeResolver::new(&units);
        assert_eq!(resolver.symbol_count(), 0);
    }
}
