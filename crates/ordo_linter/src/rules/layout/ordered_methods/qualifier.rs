//! Qualifier statements: calls and aliases that refer to a method by name.

use ordo_ruby_cst::{Definition, Statement, StatementKind};

/// Qualifier calls recognised without configuration.
pub const BUILTIN_QUALIFIERS: &[&str] = &[
    "alias_method",
    "module_function",
    "private_class_method",
    "public_class_method",
    "private",
    "protected",
    "public",
];

const VISIBILITY_MODIFIERS: &[&str] = &["private", "protected", "public"];

/// Name of the call that opens a Sorbet signature block.
const SIGNATURE_MARKER: &str = "sig";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodQualifierKind {
    /// The `alias` keyword.
    Alias,
    AliasMethod,
    ModuleFunction,
    PrivateClassMethod,
    PublicClassMethod,
    Private,
    Protected,
    Public,
    /// A name from `MethodQualifiers`.
    Custom(String),
}

impl MethodQualifierKind {
    fn from_call_name(name: &str, custom: &[String]) -> Option<Self> {
        let kind = match name {
            "alias_method" => Self::AliasMethod,
            "module_function" => Self::ModuleFunction,
            "private_class_method" => Self::PrivateClassMethod,
            "public_class_method" => Self::PublicClassMethod,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "public" => Self::Public,
            _ if custom.iter().any(|c| c == name) => Self::Custom(name.to_string()),
            _ => return None,
        };
        Some(kind)
    }
}

/// A qualifier statement and the method it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier<'a> {
    pub kind: MethodQualifierKind,
    pub target: &'a str,
}

/// Recognises qualifier statements, including configured custom macros.
#[derive(Debug, Clone, Default)]
pub struct QualifierMatcher {
    custom: Vec<String>,
}

impl QualifierMatcher {
    pub fn new(custom: impl IntoIterator<Item = String>) -> Self {
        Self {
            custom: custom.into_iter().collect(),
        }
    }

    pub fn is_custom(&self, name: &str) -> bool {
        self.custom.iter().any(|c| c == name)
    }

    /// `private :foo`, `alias_method :bar, :foo`, `memoize :foo`: the method
    /// named by the last argument.
    pub fn qualifier_call<'a>(&self, stmt: &Statement<'a>) -> Option<&'a str> {
        self.qualifier(stmt)
            .filter(|q| q.kind != MethodQualifierKind::Alias)
            .map(|q| q.target)
    }

    /// Any qualifier statement, keyword `alias` included.
    pub fn qualifier<'a>(&self, stmt: &Statement<'a>) -> Option<Qualifier<'a>> {
        match stmt.kind() {
            StatementKind::Alias(alias) => Some(Qualifier {
                kind: MethodQualifierKind::Alias,
                target: alias.old_name,
            }),
            StatementKind::Call(call) if !call.has_receiver() => {
                let kind = MethodQualifierKind::from_call_name(call.method, &self.custom)?;
                let target = call.last_symbol_argument()?;
                Some(Qualifier { kind, target })
            }
            StatementKind::Call(_)
            | StatementKind::MethodDef(_)
            | StatementKind::SingletonMethodDef(_)
            | StatementKind::Other => None,
        }
    }

    /// The method named by any qualifier statement.
    pub fn target<'a>(&self, stmt: &Statement<'a>) -> Option<&'a str> {
        self.qualifier(stmt).map(|q| q.target)
    }

    /// `memoize def foo` where `memoize` is a configured qualifier.
    pub fn wrapped_definition<'a>(&self, stmt: &Statement<'a>) -> Option<Definition<'a>> {
        let call = stmt.as_call()?;
        if call.has_receiver() || !self.is_custom(call.method) {
            return None;
        }
        call.first_argument_definition()
    }
}

/// `alias new old`: the old name.
pub fn alias<'a>(stmt: &Statement<'a>) -> Option<&'a str> {
    stmt.as_alias().map(|alias| alias.old_name)
}

/// `alias_method :new, :old`: the old name.
pub fn alias_method<'a>(stmt: &Statement<'a>) -> Option<&'a str> {
    let call = stmt.as_call()?;
    if call.has_receiver() || call.method != "alias_method" {
        return None;
    }
    call.last_symbol_argument()
}

/// A lone `private`, `protected` or `public`.
pub fn is_bare_visibility_modifier(stmt: &Statement) -> bool {
    stmt.as_call()
        .is_some_and(|call| call.is_bare() && VISIBILITY_MODIFIERS.contains(&call.method))
}

/// A bare visibility modifier or a lone `module_function`.
pub fn is_bare_access_modifier(stmt: &Statement) -> bool {
    is_bare_visibility_modifier(stmt)
        || stmt
            .as_call()
            .is_some_and(|call| call.is_bare() && call.method == "module_function")
}

/// `sig { ... }` or `sig do ... end`.
pub fn is_signature(stmt: &Statement) -> bool {
    stmt.as_call().is_some_and(|call| {
        !call.has_receiver() && call.method == SIGNATURE_MARKER && call.block.is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_ruby_cst::{CstNode, Scope};
    use ordo_ruby_parser::RubyParser;

    fn with_statements(source: &str, f: impl FnOnce(&[Statement])) {
        let mut parser = RubyParser::new();
        let result = parser.parse(source).unwrap();
        let root = CstNode::new(result.tree.root_node(), source);
        let scope = Scope::from_node(root).unwrap();
        f(scope.statements());
    }

    #[test]
    fn test_builtin_qualifiers() {
        let source = "private :a\nprotected :b\npublic :c\nmodule_function :d\n\
                      private_class_method :e\npublic_class_method :f\nalias_method :g, :h\n";
        with_statements(source, |stmts| {
            let matcher = QualifierMatcher::default();
            let targets: Vec<_> = stmts.iter().filter_map(|s| matcher.qualifier_call(s)).collect();
            assert_eq!(targets, ["a", "b", "c", "d", "e", "f", "h"]);
            assert_eq!(
                matcher.qualifier(&stmts[6]).unwrap().kind,
                MethodQualifierKind::AliasMethod
            );
        });
    }

    #[test]
    fn test_custom_qualifiers() {
        with_statements("memoize :slow\nmemoize def fast; end\n", |stmts| {
            assert_eq!(QualifierMatcher::default().qualifier_call(&stmts[0]), None);

            let matcher = QualifierMatcher::new(["memoize".to_string()]);
            assert_eq!(matcher.qualifier_call(&stmts[0]), Some("slow"));
            assert_eq!(
                matcher.qualifier(&stmts[0]).unwrap().kind,
                MethodQualifierKind::Custom("memoize".into())
            );
            assert_eq!(matcher.wrapped_definition(&stmts[1]).unwrap().name, "fast");
            assert_eq!(matcher.qualifier_call(&stmts[1]), None);
        });
    }

    #[test]
    fn test_alias_forms() {
        with_statements("alias foo bar\nalias_method :baz, :qux\n", |stmts| {
            assert_eq!(alias(&stmts[0]), Some("bar"));
            assert_eq!(alias(&stmts[1]), None);
            assert_eq!(alias_method(&stmts[1]), Some("qux"));
            assert_eq!(alias_method(&stmts[0]), None);

            let matcher = QualifierMatcher::default();
            assert_eq!(matcher.target(&stmts[0]), Some("bar"));
            assert_eq!(matcher.qualifier_call(&stmts[0]), None);
        });
    }

    #[test]
    fn test_receiver_disqualifies() {
        with_statements("self.private :a\nobj.alias_method :b, :c\n", |stmts| {
            let matcher = QualifierMatcher::default();
            assert!(stmts.iter().all(|s| matcher.qualifier(s).is_none()));
            assert_eq!(alias_method(&stmts[1]), None);
        });
    }

    #[test]
    fn test_bare_modifiers() {
        with_statements("private\nprotected\npublic\nmodule_function\nprivate :x\nfoo\n", |stmts| {
            let visibility: Vec<_> = stmts.iter().map(is_bare_visibility_modifier).collect();
            assert_eq!(visibility, [true, true, true, false, false, false]);
            let access: Vec<_> = stmts.iter().map(is_bare_access_modifier).collect();
            assert_eq!(access, [true, true, true, true, false, false]);
        });
    }

    #[test]
    fn test_signature_block() {
        with_statements("sig { void }\nsig\nsig do\n  void\nend\n", |stmts| {
            let signatures: Vec<_> = stmts.iter().map(is_signature).collect();
            assert_eq!(signatures, [true, false, true]);
        });
    }
}
