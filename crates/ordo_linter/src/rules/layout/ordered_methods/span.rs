//! The source range that moves together with a method definition.

use std::fmt;

use ordo_ruby_cst::{CommentMap, Statement};
use ordo_text_size::{Ranged, TextRange};

use super::partition::MethodRef;
use super::qualifier::{QualifierMatcher, is_bare_access_modifier, is_signature};

/// Signature annotation styles that are kept with their method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStyle {
    Sorbet,
}

impl SignatureStyle {
    pub const ALL: &'static [Self] = &[Self::Sorbet];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sorbet => "sorbet",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.as_str() == value)
    }
}

impl fmt::Display for SignatureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct SpanResolver<'s, 'a> {
    statements: &'s [Statement<'a>],
    comments: &'s CommentMap<'a>,
    matcher: &'s QualifierMatcher,
    signature: Option<SignatureStyle>,
}

impl<'s, 'a> SpanResolver<'s, 'a> {
    pub fn new(
        statements: &'s [Statement<'a>],
        comments: &'s CommentMap<'a>,
        matcher: &'s QualifierMatcher,
        signature: Option<SignatureStyle>,
    ) -> Self {
        Self {
            statements,
            comments,
            matcher,
            signature,
        }
    }

    /// The method's cluster: its definition, the qualifiers and aliases that
    /// name it, every comment attached to those, and an optional signature.
    pub fn resolve(&self, method: &MethodRef) -> TextRange {
        let end = self.cluster_end(method);
        let mut range = self.statements[method.index].range();
        for index in method.index..=end {
            range = range.cover(self.statements[index].range());
            range = self.comments.cover(index, range);
        }

        if let Some(signature) = self.signature_index(method) {
            range = range.cover(self.statements[signature].range());
            range = self.comments.cover(signature, range);
        }
        range
    }

    /// Index of the last statement naming `method` before the next method
    /// definition or bare access modifier.
    fn cluster_end(&self, method: &MethodRef) -> usize {
        let mut end = method.index;
        for stmt in &self.statements[method.index + 1..] {
            if self.is_boundary(stmt) {
                break;
            }
            if self.matcher.target(stmt) == Some(method.name) {
                end = stmt.index();
            }
        }
        end
    }

    fn is_boundary(&self, stmt: &Statement) -> bool {
        stmt.definition().is_some()
            || self.matcher.wrapped_definition(stmt).is_some()
            || is_bare_access_modifier(stmt)
    }

    /// The signature block directly above `method`, when signatures are on.
    fn signature_index(&self, method: &MethodRef) -> Option<usize> {
        match self.signature? {
            SignatureStyle::Sorbet => {
                let index = method.index.checked_sub(1)?;
                is_signature(&self.statements[index]).then_some(index)
            }
        }
    }
}
