//! A single text replacement.

use ordo_text_size::{Ranged, TextRange};

/// Replace the text in a range with new content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    range: TextRange,
    content: Option<Box<str>>,
}

impl Edit {
    /// Replace `range` with `content`.
    pub fn range_replacement(content: String, range: TextRange) -> Self {
        Self {
            range,
            content: if content.is_empty() {
                None
            } else {
                Some(content.into_boxed_str())
            },
        }
    }

    /// Delete the text in `range`.
    pub fn range_deletion(range: TextRange) -> Self {
        Self {
            range,
            content: None,
        }
    }

    /// The replacement text, or `None` for a deletion.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns true if the two edits touch a common byte.
    pub fn overlaps(&self, other: &Edit) -> bool {
        ordo_text_size::overlaps(self.range, other.range)
    }
}

impl Ranged for Edit {
    fn range(&self) -> TextRange {
        self.range
    }
}
