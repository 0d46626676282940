//! Byte offsets and ranges into source text.
//!
//! Offsets and ranges come from the `text-size` crate. This crate adds the
//! [`Ranged`] trait shared by syntax nodes, edits and diagnostics.

pub use text_size::{TextLen, TextRange, TextSize};

/// A value that covers a range of the source text.
pub trait Ranged {
    /// The range covered by this value.
    fn range(&self) -> TextRange;

    /// The start offset of the range.
    fn start(&self) -> TextSize {
        self.range().start()
    }

    /// The end offset of the range (exclusive).
    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged> Ranged for &T {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}

/// Returns true if the two ranges share at least one byte.
///
/// Touching ranges (`a.end() == b.start()`) do not overlap.
pub fn overlaps(a: TextRange, b: TextRange) -> bool {
    a.start() < b.end() && b.start() < a.end()
}
