//! Inline suppression directives.
//!
//! Recognises RuboCop-style comments, plus the same comments under an
//! `ordo:` prefix:
//! - `# rubocop:disable Layout/OrderedMethods` on its own line disables the
//!   rule until `# rubocop:enable Layout/OrderedMethods` or end of file
//! - the same directive after code on a line disables that line only
//! - `all` names every rule
//!
//! Suppressions work by tracking ranges where specific rules are disabled.

use std::collections::HashMap;

use ordo_ruby_cst::{CstNode, TreeWalker};
use ordo_text_size::{TextLen, TextSize};
use regex::Regex;

lazy_static::lazy_static! {
    static ref DIRECTIVE_RE: Regex =
        Regex::new(r"^#\s*(?:rubocop|ordo)\s*:\s*(disable|enable|todo)\s+(.+?)\s*$").unwrap();
}

/// Wildcard rule key.
const ALL_RULES: &str = "*";

/// A suppression region where a specific rule is disabled.
#[derive(Debug, Clone)]
pub struct SuppressionRegion {
    /// The rule name being suppressed (or "*" for all rules).
    pub rule: String,
    /// Start offset in the source.
    pub start: TextSize,
    /// End offset in the source (None means until end of file).
    pub end: Option<TextSize>,
}

impl SuppressionRegion {
    fn contains(&self, pos: TextSize) -> bool {
        pos >= self.start && self.end.is_none_or(|end| pos < end)
    }
}

/// Manages suppressions for a source file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// Suppression regions indexed by rule name.
    regions: HashMap<String, Vec<SuppressionRegion>>,
}

impl SuppressionContext {
    /// Create a new empty suppression context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect directives from every comment in the tree under `root`.
    pub fn from_tree(root: &CstNode) -> Self {
        let mut ctx = Self::new();
        let mut open: HashMap<String, TextSize> = HashMap::new();
        let source = root.source();

        for comment in TreeWalker::new(root.inner(), source).filter(CstNode::is_comment) {
            ctx.process_comment(&comment, &mut open);
        }

        for (rule, start) in open {
            ctx.add_region(SuppressionRegion {
                rule,
                start,
                end: None,
            });
        }
        ctx
    }

    /// Process a single comment for suppression directives.
    fn process_comment(&mut self, comment: &CstNode, open: &mut HashMap<String, TextSize>) {
        let Some(captures) = DIRECTIVE_RE.captures(comment.text()) else {
            return;
        };
        let disable = &captures[1] != "enable";
        let rules = captures[2].split(',').map(normalize_rule_name);
        let comment_start = comment.range().start();

        if !comment.starts_line() {
            if !disable {
                return;
            }
            let (line_start, line_end) = line_bounds(comment.source(), comment_start);
            for rule in rules {
                self.add_region(SuppressionRegion {
                    rule,
                    start: line_start,
                    end: Some(line_end),
                });
            }
            return;
        }

        for rule in rules {
            if disable {
                open.entry(rule).or_insert(comment_start);
            } else if let Some(start) = open.remove(&rule) {
                self.add_region(SuppressionRegion {
                    rule,
                    start,
                    end: Some(comment_start),
                });
            }
        }
    }

    /// Add a suppression region.
    fn add_region(&mut self, region: SuppressionRegion) {
        self.regions
            .entry(region.rule.clone())
            .or_default()
            .push(region);
    }

    /// Check if a diagnostic at the given position for the given rule is suppressed.
    pub fn is_suppressed(&self, rule_name: &str, pos: TextSize) -> bool {
        [rule_name, ALL_RULES].iter().any(|key| {
            self.regions
                .get(*key)
                .is_some_and(|regions| regions.iter().any(|r| r.contains(pos)))
        })
    }

    /// Check if there are any suppressions.
    pub fn has_suppressions(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// `Layout/OrderedMethods` and `OrderedMethods` name the same rule.
fn normalize_rule_name(raw: &str) -> String {
    let name = raw.trim();
    if name.eq_ignore_ascii_case("all") {
        return ALL_RULES.to_string();
    }
    name.rsplit('/').next().unwrap_or(name).to_string()
}

/// Offsets of the start and end of the line containing `pos`.
fn line_bounds(source: &str, pos: TextSize) -> (TextSize, TextSize) {
    let offset = usize::from(pos);
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    (
        source[..start].text_len(),
        source[..end].text_len(),
    )
}
