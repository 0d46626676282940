//! Ruby method-order linter with auto-fix support.

pub mod fix;
pub mod registry;
pub mod rules;
pub mod suppression;

pub use fix::{FixOutcome, apply_edits, fix_source, remove_overlapping_edits};
pub use registry::{FromSettings, RuleRegistry, SettingsError};
pub use suppression::SuppressionContext;

use ordo_config::{OrdoConfig, RuleMode};
use ordo_diagnostics::Diagnostic;
use ordo_ruby_cst::{CstNode, TreeWalker};
use ordo_ruby_parser::RubyParser;
use ordo_source_file::{LineIndex, SourceCode};
use ordo_text_size::{Ranged, TextRange};
use thiserror::Error;

/// Context provided to rules during checking.
pub struct CheckContext<'a> {
    source: &'a str,
    line_index: LineIndex,
}

impl<'a> CheckContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line_index: LineIndex::from_source_text(source),
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the cached line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Get the source code helper for line/column info.
    pub fn source_code(&self) -> SourceCode<'a, '_> {
        SourceCode::new(self.source, &self.line_index)
    }
}

/// Trait for lint rules.
pub trait Rule: Send + Sync {
    /// The rule's name, as used in `ordo.toml` and suppression comments.
    fn name(&self) -> &'static str;

    /// Node kinds this rule cares about. Empty means run on all nodes.
    fn relevant_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check a CST node for violations.
    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic>;
}

/// Why a source file could not be linted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    #[error("failed to parse source")]
    Parse,
    #[error("syntax error on line {line}")]
    Syntax { line: usize },
}

/// A diagnostic together with the rule that produced it.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub rule: &'static str,
    pub diagnostic: Diagnostic,
}

impl Ranged for LintMessage {
    fn range(&self) -> TextRange {
        self.diagnostic.range
    }
}

/// Result of linting a file.
#[derive(Debug, Default)]
pub struct LintResult {
    pub messages: Vec<LintMessage>,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Get all diagnostics, in document order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter().map(|m| &m.diagnostic)
    }

    /// Get all fixable messages.
    pub fn fixable(&self) -> impl Iterator<Item = &LintMessage> {
        self.messages.iter().filter(|m| m.diagnostic.fix.is_some())
    }
}

/// A rule together with how its violations are handled.
struct ConfiguredRule {
    rule: Box<dyn Rule>,
    mode: RuleMode,
}

/// The set of enabled rules, ready to run over source files.
#[derive(Default)]
pub struct Linter {
    rules: Vec<ConfiguredRule>,
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule running in `mode`. Disabled rules are not added.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn Rule>, mode: RuleMode) -> Self {
        if mode != RuleMode::Disabled {
            self.rules.push(ConfiguredRule { rule, mode });
        }
        self
    }

    /// Build every enabled built-in rule from `config`.
    ///
    /// Fails on the first rule whose settings are invalid.
    pub fn from_config(config: &OrdoConfig) -> Result<Self, SettingsError> {
        let registry = RuleRegistry::builtin();
        let mut linter = Self::new();
        for name in registry.rule_names() {
            let mode = config.rule_mode(name);
            if mode == RuleMode::Disabled {
                tracing::debug!(rule = name, "rule disabled");
                continue;
            }
            if let Some(rule) = registry.create_rule(name, config) {
                linter = linter.with_rule(rule?, mode);
            }
        }
        Ok(linter)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.rule.name())
    }

    /// Lint `source`, dropping suppressed diagnostics.
    ///
    /// Rules in check mode report without fixes.
    pub fn lint(&self, source: &str) -> Result<LintResult, LintError> {
        let mut parser = RubyParser::new();
        let parsed = parser.parse(source).ok_or(LintError::Parse)?;
        if parsed.has_syntax_errors() {
            let line = parsed.first_error_row().map_or(1, |row| row + 1);
            return Err(LintError::Syntax { line });
        }

        let ctx = CheckContext::new(source);
        let root = CstNode::new(parsed.tree.root_node(), source);
        let suppressions = SuppressionContext::from_tree(&root);

        let mut result = LintResult::new();
        for node in TreeWalker::new(root.inner(), source) {
            for configured in &self.rules {
                let rule = &configured.rule;
                let kinds = rule.relevant_kinds();
                if !kinds.is_empty() && !kinds.contains(&node.kind()) {
                    continue;
                }
                for mut diagnostic in rule.check(&ctx, &node) {
                    if suppressions.is_suppressed(rule.name(), diagnostic.range.start()) {
                        continue;
                    }
                    if configured.mode == RuleMode::Check {
                        diagnostic.fix = None;
                    }
                    result.messages.push(LintMessage {
                        rule: rule.name(),
                        diagnostic,
                    });
                }
            }
        }

        result.messages.sort_by_key(|m| m.diagnostic.range.start());
        tracing::debug!(diagnostics = result.len(), "linted source");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linter() -> Linter {
        Linter::from_config(&OrdoConfig::default()).unwrap()
    }

    #[test]
    fn test_default_linter_has_ordered_methods() {
        let names: Vec<_> = linter().rule_names().collect();
        assert_eq!(names, ["OrderedMethods"]);
    }

    #[test]
    fn test_lint_reports_in_document_order() {
        let source = "class Foo\n  def d; end\n  def c; end\nend\n\ndef b; end\ndef a; end\n";
        let result = linter().lint(source).unwrap();
        let starts: Vec<_> = result
            .diagnostics()
            .map(|d| &source[d.range])
            .collect();
        assert_eq!(starts, ["def c; end", "def a; end"]);
        assert!(result.messages.iter().all(|m| m.rule == "OrderedMethods"));
    }

    #[test]
    fn test_syntax_error() {
        let err = linter().lint("class Foo\n  def a(\n").unwrap_err();
        assert!(matches!(err, LintError::Syntax { .. }));
    }

    #[test]
    fn test_check_mode_strips_fixes() {
        let config = OrdoConfig::parse("[fix.rules]\nOrderedMethods = \"check\"\n").unwrap();
        let result = Linter::from_config(&config)
            .unwrap()
            .lint("def b; end\ndef a; end\n")
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.fixable().count(), 0);
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let config = OrdoConfig::parse("[OrderedMethods]\nEnabled = false\n").unwrap();
        let linter = Linter::from_config(&config).unwrap();
        assert!(linter.is_empty());
        assert!(linter.lint("def b; end\ndef a; end\n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_settings_fail_construction() {
        let config = OrdoConfig::parse("[OrderedMethods]\nEnforcedStyle = \"random\"\n").unwrap();
        let err = Linter::from_config(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid \"EnforcedStyle\" config for Layout/OrderedMethods. Expected one of: alphabetical"
        );
    }
}
