//! Vetoes swaps that would declare an `alias` before the method it names.

use ordo_ruby_cst::Statement;
use thiserror::Error;

use super::partition::MethodRef;
use super::qualifier::{QualifierMatcher, alias};

/// A swap refused because `first`'s alias would precede `first` itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Won't reorder {first} and {second} because alias for {first} would be declared before its method definition."
)]
pub struct AliasConflict {
    pub first: String,
    pub second: String,
    /// Statement index of the method that owns the alias.
    pub offending: usize,
}

pub struct AliasOrderVerifier<'s, 'a> {
    statements: &'s [Statement<'a>],
    matcher: &'s QualifierMatcher,
    signature_aware: bool,
}

impl<'s, 'a> AliasOrderVerifier<'s, 'a> {
    pub fn new(
        statements: &'s [Statement<'a>],
        matcher: &'s QualifierMatcher,
        signature_aware: bool,
    ) -> Self {
        Self {
            statements,
            matcher,
            signature_aware,
        }
    }

    /// Check both directions of swapping `previous` and `current`.
    pub fn verify(&self, previous: &MethodRef, current: &MethodRef) -> Result<(), AliasConflict> {
        self.check(current, previous)?;
        self.check(previous, current)
    }

    fn check(&self, method: &MethodRef, other: &MethodRef) -> Result<(), AliasConflict> {
        match self.belonging_alias(method) {
            Some(alias_index) if other.index >= alias_index => Err(AliasConflict {
                first: method.name.to_string(),
                second: other.name.to_string(),
                offending: method.index,
            }),
            _ => Ok(()),
        }
    }

    /// Index of the `alias` statement that directly follows `method` and
    /// names it. With signatures enabled, qualifier calls for the method may
    /// sit in between.
    fn belonging_alias(&self, method: &MethodRef) -> Option<usize> {
        let mut index = method.index + 1;
        if self.signature_aware {
            while self
                .statements
                .get(index)
                .and_then(|stmt| self.matcher.qualifier_call(stmt))
                == Some(method.name)
            {
                index += 1;
            }
        }
        let stmt = self.statements.get(index)?;
        (alias(stmt) == Some(method.name)).then_some(index)
    }
}
