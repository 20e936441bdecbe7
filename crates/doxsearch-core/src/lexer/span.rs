//! Byte spans and line/column positions inside a table file

#![allow(clippy::cast_possible_truncation)] // Table files larger than 4GB are unsupported

use std::ops::Range;

/// A byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: u32,
    /// Byte offset one past the last byte
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A 1-indexed line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    /// Column counted in characters, not bytes
    pub column: u32,
}

impl Location {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets to line/column locations
///
/// Doxygen writes one entry per line, so the line number alone is usually
/// enough to find a broken entry in a table file.
#[derive(Debug, Clone)]
pub struct LineIndex<'source> {
    /// Byte offsets where each line starts
    line_starts: Vec<u32>,
    /// Borrowed for character-based columns
    source: &'source str,
}

impl<'source> LineIndex<'source> {
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .match_indices('\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self { line_starts, source }
    }

    /// Convert a byte offset to a line/column location
    #[must_use]
    pub fn location(&self, offset: u32) -> Location {
        let offset = offset.min(self.source.len() as u32);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map_or(offset as usize - line_start, |s| s.chars().count());
        Location::new((line + 1) as u32, column as u32 + 1)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
