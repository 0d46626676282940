//! Fixes: one or more edits applied together.

use ordo_text_size::Ranged;

use crate::Edit;

/// How confident we are that applying a fix preserves program behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, is_macro::Is)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Applicability {
    /// Shown to the user, never applied.
    DisplayOnly,
    /// Applied only on request (`--unsafe`).
    Unsafe,
    /// Applied automatically.
    Safe,
}

/// A set of edits that must be applied atomically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fix {
    edits: Vec<Edit>,
    applicability: Applicability,
}

impl Fix {
    /// A safe fix made of a single edit.
    pub fn safe_edit(edit: Edit) -> Self {
        Self::with_applicability(edit, Vec::new(), Applicability::Safe)
    }

    /// A safe fix made of `edit` and `rest`.
    pub fn safe_edits(edit: Edit, rest: impl IntoIterator<Item = Edit>) -> Self {
        Self::with_applicability(edit, rest, Applicability::Safe)
    }

    fn with_applicability(
        edit: Edit,
        rest: impl IntoIterator<Item = Edit>,
        applicability: Applicability,
    ) -> Self {
        let mut edits: Vec<Edit> = std::iter::once(edit).chain(rest).collect();
        edits.sort_by_key(|edit| (edit.start(), edit.end()));
        Self {
            edits,
            applicability,
        }
    }

    /// The edits, sorted by start offset.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn applicability(&self) -> Applicability {
        self.applicability
    }

    /// Returns true if this fix may be applied at the requested level.
    pub fn applies(&self, requested: Applicability) -> bool {
        !self.applicability.is_display_only() && self.applicability >= requested
    }

    /// Returns true if any edit of this fix overlaps any edit of `other`.
    pub fn conflicts_with(&self, other: &[Edit]) -> bool {
        self.edits
            .iter()
            .any(|edit| other.iter().any(|existing| edit.overlaps(existing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_text_size::{TextRange, TextSize};

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_edits_sorted_by_start() {
        let fix = Fix::safe_edits(
            Edit::range_replacement("b".to_string(), range(10, 12)),
            [Edit::range_replacement("a".to_string(), range(0, 2))],
        );
        assert_eq!(fix.edits()[0].start(), TextSize::new(0));
        assert_eq!(fix.edits()[1].start(), TextSize::new(10));
    }

    #[test]
    fn test_applicability() {
        let safe = Fix::safe_edit(Edit::range_deletion(range(0, 1)));
        let unsafe_fix = Fix::with_applicability(
            Edit::range_deletion(range(0, 1)),
            Vec::new(),
            Applicability::Unsafe,
        );

        assert!(safe.applies(Applicability::Safe));
        assert!(safe.applies(Applicability::Unsafe));
        assert!(!unsafe_fix.applies(Applicability::Safe));
        assert!(unsafe_fix.applies(Applicability::Unsafe));
    }

    #[test]
    fn test_conflicts_with() {
        let fix = Fix::safe_edits(
            Edit::range_replacement("x".to_string(), range(0, 4)),
            [Edit::range_replacement("y".to_string(), range(8, 12))],
        );
        assert!(fix.conflicts_with(&[Edit::range_deletion(range(10, 11))]));
        assert!(!fix.conflicts_with(&[Edit::range_deletion(range(4, 8))]));
    }
}
