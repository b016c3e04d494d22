//! Insertion points with the placement hints needed to format around them.

use hinge_core::{Position, Range};
use serde::Serialize;

/// Which side of the anchor the new text goes on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Before,
    After,
    /// No anchor: the text is inserted exactly as given.
    #[default]
    Verbatim,
}

/// Where to insert text, and how it should sit relative to its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProposedPosition {
    pub position: Position,
    /// The symbol (or line) the insertion is placed against. Its first line
    /// supplies the indentation of the inserted text.
    pub relative_to: Option<Range>,
    pub side: Side,
    /// Separate from the anchor by a line break only, never a blank line.
    pub next_to: bool,
    /// Indent one level deeper than the anchor.
    pub indent: bool,
    /// The position is just inside the braces of an empty scope.
    pub empty_scope: bool,
}

impl ProposedPosition {
    /// A bare position at the very start of a document.
    #[must_use]
    pub fn start_of_document() -> Self {
        Self::ahead_of(Position::default())
    }

    /// Insert in front of whatever code starts at `position`, unindented.
    #[must_use]
    pub fn ahead_of(position: Position) -> Self {
        Self {
            position,
            side: Side::Before,
            ..Self::default()
        }
    }

    /// A bare position with nothing to align against, such as the end of a
    /// document with no code. Text placed here is not reformatted.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn after(anchor: Range, position: Position) -> Self {
        Self {
            position,
            relative_to: Some(anchor),
            side: Side::After,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn before(anchor: Range, position: Position) -> Self {
        Self {
            position,
            relative_to: Some(anchor),
            side: Side::Before,
            ..Self::default()
        }
    }

    /// Just inside the opening brace of `scope`, which has no members.
    #[must_use]
    pub fn inside_empty_scope(scope: Range, position: Position) -> Self {
        Self {
            position,
            relative_to: Some(scope),
            side: Side::After,
            next_to: true,
            indent: false,
            empty_scope: true,
        }
    }

    #[must_use]
    pub const fn with_next_to(mut self) -> Self {
        self.next_to = true;
        self
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_side_and_anchor() {
        let anchor = Range::new(Position::new(2, 0), Position::new(4, 1));
        let after = ProposedPosition::after(anchor, Position::new(4, 1));
        assert_eq!(after.side, Side::After);
        assert_eq!(after.relative_to, Some(anchor));
        assert!(!after.next_to);

        let before = ProposedPosition::before(anchor, Position::new(2, 0)).with_next_to();
        assert_eq!(before.side, Side::Before);
        assert!(before.next_to);

        let bare = ProposedPosition::at(Position::new(7, 0));
        assert_eq!(bare.side, Side::Verbatim);
        assert_eq!(bare.relative_to, None);

        let empty = ProposedPosition::inside_empty_scope(anchor, Position::new(2, 13)).with_indent(true);
        assert!(empty.empty_scope && empty.next_to && empty.indent);
    }
}
