//! Source positions and the line index over the original text.

use std::ops::Range;

use crate::error::{Error, Result};

/// A position in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    /// Byte offset into the original text.
    pub offset: usize,
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column, counted in characters.
    pub col: u32,
}

/// A half-open `[start, end)` region of the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    /// Create a span between two locations.
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Check if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range into the original text.
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// The original source text together with a line index.
///
/// Passes that move an offset (trimming whitespace, splitting out
/// interpolations) go through [`SourceText::move_by`] so that line and
/// column stay consistent with the byte offset.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    /// Index the given text.
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1));
        Self { text, line_starts }
    }

    /// The full original text.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length of the original text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the original text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Resolve a byte offset to a full location.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = match self.text.get(line_start..offset) {
            Some(prefix) => prefix.chars().count(),
            None => offset - line_start,
        };
        SourceLocation {
            offset,
            line: line as u32,
            col: col as u32,
        }
    }

    /// Build a span from a byte range.
    pub fn span(&self, range: Range<usize>) -> SourceSpan {
        SourceSpan::new(self.location(range.start), self.location(range.end))
    }

    /// Move a location by `delta` bytes.
    pub fn move_by(&self, location: SourceLocation, delta: isize) -> SourceLocation {
        self.location(location.offset.saturating_add_signed(delta))
    }

    /// The text covered by `span`.
    pub fn slice(&self, span: &SourceSpan) -> Result<&'a str> {
        self.text
            .get(span.range())
            .ok_or(Error::SpanOutOfBounds {
                start: span.start.offset,
                end: span.end.offset,
                len: self.text.len(),
            })
    }
}
