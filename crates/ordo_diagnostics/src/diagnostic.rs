//! Diagnostic types for reporting violations.

use ordo_text_size::{Ranged, TextRange};

use crate::Fix;

/// Indicates whether a fix is available for a violation.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum FixAvailability {
    /// A fix is always available.
    Always,
    /// A fix is sometimes available.
    Sometimes,
    /// A fix is never available.
    #[default]
    None,
}

/// A trait for violations that can be reported as diagnostics.
pub trait Violation: std::fmt::Debug + Clone + Send + Sync {
    /// The availability of a fix for this violation.
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::None;

    /// Returns the message describing the violation.
    fn message(&self) -> String;

    /// Returns the title for the fix, if available.
    fn fix_title(&self) -> Option<String> {
        None
    }
}

/// The kind of diagnostic (violation name and message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    /// The violation name (e.g., "UnorderedMethod").
    pub code: String,
    /// The message body.
    pub body: String,
    /// The fix title, if the violation offers one.
    pub suggestion: Option<String>,
}

/// A diagnostic representing a violation found in source code.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The kind of diagnostic.
    pub kind: DiagnosticKind,
    /// The range in the source where the violation occurs.
    pub range: TextRange,
    /// The optional fix for the violation.
    pub fix: Option<Fix>,
    /// Why a fix was withheld, when the rule decided not to offer one.
    pub note: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic from a violation.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new<V: Violation>(violation: V, range: TextRange) -> Self {
        Self {
            kind: DiagnosticKind {
                code: std::any::type_name::<V>()
                    .split("::")
                    .last()
                    .unwrap_or("Unknown")
                    .to_string(),
                body: violation.message(),
                suggestion: violation.fix_title(),
            },
            range,
            fix: None,
            note: None,
        }
    }

    /// Add a fix to this diagnostic.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Set the fix for this diagnostic.
    pub fn set_fix(&mut self, fix: Fix) {
        self.fix = Some(fix);
    }

    /// Attach a note explaining the diagnostic.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns true if this diagnostic has a fix.
    pub fn fixable(&self) -> bool {
        self.fix.is_some()
    }
}

impl Ranged for Diagnostic {
    fn range(&self) -> TextRange {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edit;
    use ordo_text_size::TextSize;

    #[derive(Debug, Clone)]
    struct OutOfOrder;

    impl Violation for OutOfOrder {
        const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

        fn message(&self) -> String {
            "out of order".to_string()
        }
    }

    #[test]
    fn test_code_is_violation_type_name() {
        let range = TextRange::new(TextSize::new(0), TextSize::new(3));
        let diagnostic = Diagnostic::new(OutOfOrder, range);
        assert_eq!(diagnostic.kind.code, "OutOfOrder");
        assert_eq!(diagnostic.kind.body, "out of order");
        assert!(!diagnostic.fixable());
    }

    #[test]
    fn test_with_fix_and_note() {
        let range = TextRange::new(TextSize::new(0), TextSize::new(3));
        let diagnostic = Diagnostic::new(OutOfOrder, range)
            .with_note("kept in place")
            .with_fix(Fix::safe_edit(Edit::range_deletion(range)));
        assert!(diagnostic.fixable());
        assert_eq!(diagnostic.note.as_deref(), Some("kept in place"));
    }
}
