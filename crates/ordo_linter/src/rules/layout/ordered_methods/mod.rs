//! OrderedMethods rule implementation.
//!
//! Checks that methods are defined in alphabetical order within each run of
//! same-visibility, same-context (instance or singleton) definitions, and
//! swaps out-of-order pairs together with their comments, qualifiers,
//! aliases and signatures.
//!
//! ```ruby
//! # bad
//! def self.b; end
//! def self.a; end
//!
//! def b; end
//! def a; end
//!
//! private
//!
//! def d; end
//! def c; end
//!
//! # good
//! def self.a; end
//! def self.b; end
//!
//! def a; end
//! def b; end
//!
//! private
//!
//! def c; end
//! def d; end
//! ```

mod alias_order;
mod corrector;
mod ordering;
mod partition;
mod qualifier;
mod span;

pub use alias_order::{AliasConflict, AliasOrderVerifier};
pub use corrector::swap_fix;
pub use ordering::{Alphabetical, EnforcedStyle, OrderingPolicy, OutOfOrder, find_violations};
pub use partition::{Member, MethodRef, Partition, Partitioner};
pub use qualifier::{
    BUILTIN_QUALIFIERS, MethodQualifierKind, Qualifier, QualifierMatcher, alias, alias_method,
    is_bare_access_modifier, is_bare_visibility_modifier, is_signature,
};
pub use span::{SignatureStyle, SpanResolver};

use std::collections::HashSet;

use ordo_config::{OrderedMethodsSettings, OrdoConfig};
use ordo_diagnostics::{Diagnostic, FixAvailability, Violation};
use ordo_ruby_cst::{CommentMap, CstNode, SCOPE_KINDS, Scope};
use ordo_text_size::Ranged;

use crate::{CheckContext, FromSettings, Rule, SettingsError};

/// Name used in RuboCop configuration and error messages.
const QUALIFIED_NAME: &str = "Layout/OrderedMethods";

/// Configuration for OrderedMethods rule.
#[derive(Debug)]
pub struct OrderedMethods {
    policy: Box<dyn OrderingPolicy>,
    matcher: QualifierMatcher,
    exempt: HashSet<String>,
    signature: Option<SignatureStyle>,
}

impl OrderedMethods {
    /// Build the rule, rejecting unknown `EnforcedStyle` or `Signature` values.
    pub fn new(settings: &OrderedMethodsSettings) -> Result<Self, SettingsError> {
        let style = EnforcedStyle::parse(&settings.enforced_style).ok_or_else(|| {
            invalid_option("EnforcedStyle", EnforcedStyle::ALL.iter().map(|s| s.as_str()))
        })?;
        let signature = settings
            .signature
            .as_deref()
            .map(|value| {
                SignatureStyle::parse(value).ok_or_else(|| {
                    invalid_option("Signature", SignatureStyle::ALL.iter().map(|s| s.as_str()))
                })
            })
            .transpose()?;

        Ok(Self {
            policy: style.policy(),
            matcher: QualifierMatcher::new(settings.method_qualifiers.iter().cloned()),
            exempt: settings.exempt_methods().map(str::to_string).collect(),
            signature,
        })
    }

    pub fn style(&self) -> EnforcedStyle {
        self.policy.style()
    }
}

impl Default for OrderedMethods {
    fn default() -> Self {
        Self {
            policy: EnforcedStyle::default().policy(),
            matcher: QualifierMatcher::default(),
            exempt: HashSet::new(),
            signature: None,
        }
    }
}

impl FromSettings for OrderedMethods {
    const RULE_NAME: &'static str = OrderedMethodsSettings::RULE_NAME;

    fn from_settings(config: &OrdoConfig) -> Result<Self, SettingsError> {
        Self::new(&config.ordered_methods)
    }
}

fn invalid_option<'a>(key: &'static str, expected: impl Iterator<Item = &'a str>) -> SettingsError {
    SettingsError::InvalidOption {
        rule: QUALIFIED_NAME,
        key,
        expected: expected.collect::<Vec<_>>().join(", "),
    }
}

/// Violation for a method defined after one that should follow it.
#[derive(Debug, Clone)]
pub struct UnorderedMethod {
    pub style: EnforcedStyle,
}

impl Violation for UnorderedMethod {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!("Methods should be sorted in {} order.", self.style)
    }

    fn fix_title(&self) -> Option<String> {
        Some("Swap with the preceding method".to_string())
    }
}

impl Rule for OrderedMethods {
    fn name(&self) -> &'static str {
        OrderedMethodsSettings::RULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        SCOPE_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let Some(scope) = Scope::from_node(*node) else {
            return vec![];
        };
        if scope.len() < 2 {
            return vec![];
        }

        let statements = scope.statements();
        let partitions = Partitioner::new(&self.matcher, &self.exempt).partition(statements);
        let violations = find_violations(&partitions, self.policy.as_ref());
        tracing::debug!(
            scope = node.kind(),
            line = node.start_row() + 1,
            partitions = partitions.len(),
            violations = violations.len(),
            "checked scope"
        );
        if violations.is_empty() {
            return vec![];
        }

        let comments = CommentMap::from_scope(&scope);
        let verifier = AliasOrderVerifier::new(statements, &self.matcher, self.signature.is_some());
        let resolver = SpanResolver::new(statements, &comments, &self.matcher, self.signature);
        let mut uncorrectable: HashSet<usize> = HashSet::new();

        violations
            .iter()
            .map(|violation| {
                let OutOfOrder { previous, current } = violation;
                let mut diagnostic = Diagnostic::new(
                    UnorderedMethod {
                        style: self.style(),
                    },
                    statements[current.index].range(),
                );

                if uncorrectable.contains(&previous.index) || uncorrectable.contains(&current.index)
                {
                    return diagnostic;
                }

                match verifier.verify(previous, current) {
                    Ok(()) => {
                        let fix = swap_fix(
                            ctx.source(),
                            resolver.resolve(previous),
                            resolver.resolve(current),
                        );
                        if let Some(fix) = fix {
                            diagnostic.set_fix(fix);
                        }
                    }
                    Err(conflict) => {
                        tracing::warn!("{conflict}");
                        uncorrectable.insert(conflict.offending);
                        diagnostic = diagnostic.with_note(conflict.to_string());
                    }
                }
                diagnostic
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_ruby_cst::TreeWalker;
    use ordo_ruby_parser::RubyParser;

    fn check_with(source: &str, rule: &OrderedMethods) -> Vec<Diagnostic> {
        let mut parser = RubyParser::new();
        let result = parser.parse(source).unwrap();
        let ctx = CheckContext::new(source);

        let mut diagnostics = vec![];
        for node in TreeWalker::new(result.tree.root_node(), source) {
            if rule.relevant_kinds().contains(&node.kind()) {
                diagnostics.extend(rule.check(&ctx, &node));
            }
        }
        diagnostics
    }

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_with(source, &OrderedMethods::default())
    }

    #[test]
    fn test_ordered_methods() {
        assert!(check_source("def a; end\ndef b; end\n").is_empty());
    }

    #[test]
    fn test_unordered_methods() {
        let source = "def b; end\ndef a; end\n";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(&source[diagnostics[0].range], "def a; end");
        assert_eq!(
            diagnostics[0].kind.body,
            "Methods should be sorted in alphabetical order."
        );
        assert!(diagnostics[0].fixable());
    }

    #[test]
    fn test_single_statement_scope() {
        assert!(check_source("class Foo\n  def a; end\nend\n").is_empty());
    }

    #[test]
    fn test_alias_conflict_is_not_fixable() {
        let diagnostics = check_source("def b; end\nalias x b\ndef a; end\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].fixable());
        assert_eq!(
            diagnostics[0].note.as_deref(),
            Some(
                "Won't reorder b and a because alias for b would be declared before its method definition."
            )
        );
    }

    #[test]
    fn test_alias_conflict_only_blocks_its_pair() {
        // `b` may still move above `c`; only moving `a` above `b` is refused.
        let diagnostics = check_source("def c; end\ndef b; end\nalias x b\ndef a; end\n");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].fixable());
        assert!(!diagnostics[1].fixable());
    }

    #[test]
    fn test_ignored_methods() {
        let settings = OrderedMethodsSettings {
            ignored_methods: vec!["initialize".to_string()],
            ..OrderedMethodsSettings::default()
        };
        let rule = OrderedMethods::new(&settings).unwrap();
        let diagnostics = check_with("def z; end\ndef initialize; end\ndef zz; end\n", &rule);
        assert!(diagnostics.is_empty());
        assert_eq!(check_source("def z; end\ndef initialize; end\n").len(), 1);
    }

    #[test]
    fn test_allowed_methods_merge_with_ignored() {
        let settings = OrderedMethodsSettings {
            allowed_methods: vec!["call".to_string()],
            ..OrderedMethodsSettings::default()
        };
        let rule = OrderedMethods::new(&settings).unwrap();
        assert!(check_with("def d; end\ndef call; end\ndef e; end\n", &rule).is_empty());
    }

    #[test]
    fn test_invalid_style() {
        let settings = OrderedMethodsSettings {
            enforced_style: "by_length".to_string(),
            ..OrderedMethodsSettings::default()
        };
        let err = OrderedMethods::new(&settings).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid \"EnforcedStyle\" config for Layout/OrderedMethods. Expected one of: alphabetical"
        );
    }

    #[test]
    fn test_nested_scopes_checked_independently() {
        let source = "class A\n  def b; end\n  def a; end\nend\n\nclass B\n  def d; end\nend\n";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_equal_sorbet_overloads() {
        let settings = OrderedMethodsSettings {
            signature: Some("sorbet".to_string()),
            ..OrderedMethodsSettings::default()
        };
        let rule = OrderedMethods::new(&settings).unwrap();
        let source = "sig { void }\ndef foo; end\nsig { void }\ndef foo; end\n";
        assert!(check_with(source, &rule).is_empty());
    }
}
