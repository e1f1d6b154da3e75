//! Source locations attached to declarations and diagnostics
//!
//! Every declaration node the resolution stage hands over carries the
//! location of the syntax it came from, so checkers can point at the exact
//! offending token (a type parameter, a value parameter) instead of the
//! enclosing declaration.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize)]
#[display("file#{_0}")]
pub struct FileId(pub u32);

/// A half-open byte range in a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display, Serialize, Deserialize)]
#[display("{start}..{end}")]
pub struct Span {
    /// First byte covered by the span
    pub start: u32,
    /// One past the last byte covered by the span
    pub end: u32,
}

impl Span {
    /// Creates a span, swapping the bounds if they are given in reverse
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Byte range usable for slicing the file text
    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both spans
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Location of a syntax element: the file plus the byte span inside it
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display, Serialize, Deserialize)]
#[display("{file}@{span}")]
pub struct SourceLocation {
    /// File the element lives in
    pub file: FileId,
    /// Byte span of the element
    pub span: Span,
}

impl SourceLocation {
    /// Creates a location
    #[must_use]
    pub fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// Placeholder location for synthesized declarations that have no syntax
    #[must_use]
    pub fn synthetic() -> Self {
        Self::new(FileId(u32::MAX), Span::new(0, 0))
    }

    /// Whether this is the placeholder produced by [`SourceLocation::synthetic`]
    pub fn is_synthetic(self) -> bool {
        self.file == FileId(u32::MAX)
    }

    /// Byte range inside the file
    pub fn range(self) -> Range<usize> {
        self.span.range()
    }
}
