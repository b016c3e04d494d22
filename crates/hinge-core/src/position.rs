//! Zero-based line/character coordinates.
//!
//! `character` counts Unicode scalar values within the line, so a position is
//! independent of the encoding used to store the document. Byte offsets are
//! obtained through [`SourceDocument`](crate::SourceDocument).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based line and character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Build a range, swapping the endpoints if they arrive reversed.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// An empty range at `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `position` lies within the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Whether `other` lies entirely within this range.
    #[must_use]
    pub fn contains_range(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The smallest range covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A range inside a particular file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

impl Location {
    #[must_use]
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_by_line_then_character() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 1) > Position::new(2, 0));
    }

    #[test]
    fn reversed_range_is_normalized() {
        let range = Range::new(Position::new(4, 0), Position::new(1, 2));
        assert_eq!(range.start, Position::new(1, 2));
        assert_eq!(range.end, Position::new(4, 0));
    }

    #[test]
    fn containment_is_inclusive() {
        let outer = Range::new(Position::new(0, 0), Position::new(5, 1));
        let inner = Range::new(Position::new(1, 0), Position::new(5, 1));
        assert!(outer.contains_range(&inner));
        assert!(outer.contains(Position::new(5, 1)));
        assert!(!inner.contains_range(&outer));
    }

    #[test]
    fn union_covers_both() {
        let a = Range::new(Position::new(1, 0), Position::new(2, 0));
        let b = Range::new(Position::new(0, 4), Position::new(1, 5));
        assert_eq!(a.union(&b), Range::new(Position::new(0, 4), Position::new(2, 0)));
    }
}
