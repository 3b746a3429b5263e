//! Source location tracking for tokens and syntax tree nodes.
//!
//! Every token and node carries a `Span` so that later passes (analyzer,
//! type checker, interpreter) can point diagnostics at the offending text.
//!
//! # Examples
//!
//! ```
//! use sable_syntax::span::Span;
//!
//! let left = Span::new(0, 3, 1, 1, 1, 4);
//! let right = Span::new(8, 10, 2, 3, 2, 5);
//! let merged = Span::merge(left, right);
//!
//! assert_eq!(merged.start, 0);
//! assert_eq!(merged.end, 10);
//! assert_eq!(merged.end_line, 2);
//! ```

use std::fmt;

/// A source code span tracking byte offsets and line/column positions.
///
/// Offsets are 0-indexed and `end` is exclusive. Lines and columns are
/// 1-indexed, with columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the span start (0-indexed)
    pub start: usize,

    /// Byte offset of the span end (exclusive)
    pub end: usize,

    /// Line number of the span start (1-indexed)
    pub start_line: usize,

    /// Column number of the span start (1-indexed)
    pub start_col: usize,

    /// Line number of the span end (1-indexed)
    pub end_line: usize,

    /// Column number of the span end (1-indexed)
    pub end_col: usize,
}

impl Span {
    /// Creates a new span from byte offsets and line/column positions.
    #[must_use]
    pub const fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Merges two spans into one covering both.
    ///
    /// The result starts where `left` starts and ends where `right` ends.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start: left.start,
            end: right.end,
            start_line: left.start_line,
            start_col: left.start_col,
            end_line: right.end_line,
            end_col: right.end_col,
        }
    }

    /// Creates a zero-length span at a single position (EOF, missing tokens).
    ///
    /// ```
    /// use sable_syntax::span::Span;
    ///
    /// let span = Span::point(100, 5, 10);
    /// assert!(span.is_empty());
    /// assert_eq!(span.start_line, 5);
    /// ```
    #[must_use]
    pub const fn point(offset: usize, line: usize, col: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
        }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span has zero length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the source text covered by this span, or `""` if the span
    /// does not fall on character boundaries of `source`.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Trait for types that have a source span.
///
/// Implemented by tokens, expressions and statements.
pub trait Spanned {
    /// Returns the source span of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let left = Span::new(0, 10, 1, 1, 1, 11);
        let right = Span::new(15, 25, 2, 1, 2, 11);
        let merged = Span::merge(left, right);

        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 25);
        assert_eq!(merged.start_line, 1);
        assert_eq!(merged.start_col, 1);
        assert_eq!(merged.end_line, 2);
        assert_eq!(merged.end_col, 11);
    }

    #[test]
    fn test_span_len_and_empty() {
        let span = Span::new(10, 20, 1, 5, 1, 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(Span::point(4, 1, 5).is_empty());
    }

    #[test]
    fn test_span_text() {
        let source = "let answer = 42;";
        let span = Span::new(4, 10, 1, 5, 1, 11);
        assert_eq!(span.text(source), "answer");

        let out_of_range = Span::new(40, 50, 1, 1, 1, 1);
        assert_eq!(out_of_range.text(source), "");
    }

    #[test]
    fn test_span_display() {
        let span = Span::new(0, 10, 5, 10, 5, 20);
        assert_eq!(format!("{}", span), "5:10");
    }
}
