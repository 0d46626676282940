//! Line/column lookup for source files.

use std::fmt;
use std::num::NonZeroUsize;

use ordo_text_size::TextSize;

/// A one-based line or column number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    /// Build from a zero-based index.
    pub fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line and column in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

/// Byte offsets of every line start in a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Index the line starts of `text`.
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(TextSize::new(0));
        for newline in memchr::memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(TextSize::new(u32::try_from(newline + 1).unwrap_or(u32::MAX)));
        }
        Self { line_starts }
    }

    /// Number of lines (a trailing newline opens one more, empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        match self.line_starts.binary_search(&offset) {
            Ok(row) => OneIndexed::from_zero_indexed(row),
            Err(next_row) => OneIndexed::from_zero_indexed(next_row - 1),
        }
    }

    /// Offset of the first byte of `line`.
    pub fn line_start(&self, line: OneIndexed) -> Option<TextSize> {
        self.line_starts.get(line.to_zero_indexed()).copied()
    }

    /// Line and character column of `offset` in `text`.
    pub fn source_location(&self, offset: TextSize, text: &str) -> SourceLocation {
        let line = self.line_index(offset);
        let line_start = self.line_starts[line.to_zero_indexed()];
        let prefix = &text[usize::from(line_start)..usize::from(offset)];
        SourceLocation {
            line,
            column: OneIndexed::from_zero_indexed(prefix.chars().count()),
        }
    }
}

/// A source text paired with its line index.
#[derive(Debug, Clone, Copy)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    pub fn line_column(&self, offset: TextSize) -> SourceLocation {
        self.index.source_location(offset, self.text)
    }

    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        self.index.line_index(offset)
    }

    pub fn text(&self) -> &'src str {
        self.text
    }
}
