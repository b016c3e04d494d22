//! Position proposals: where a new definition, include, header guard, or
//! member function should be inserted.
//!
//! Every proposal degrades through fallbacks instead of failing. Oracle
//! lookups happen in a fixed nearest-first order and stop at the first hit.

mod definition;
mod include;
mod member;

pub use definition::{SearchOptions, find_position_for_function_definition};
pub use include::{IncludePositions, find_position_for_new_header_guard, find_position_for_new_include};
pub use member::{Access, MemberPosition, find_position_for_new_member_function};

use hinge_core::{Position, SourceDocument};
use hinge_parser::SourceSymbol;

use crate::position::ProposedPosition;

/// Insert after `symbol`, past any `;` that ends its statement.
fn after_symbol(symbol: &SourceSymbol<'_>) -> ProposedPosition {
    let end = symbol.statement_end();
    ProposedPosition::after(hinge_core::Range::new(symbol.true_start(), end), end)
}

/// Insert in front of `symbol` and the comment above it.
fn before_symbol(symbol: &SourceSymbol<'_>) -> ProposedPosition {
    let start = line_start_if_indented(symbol.document(), symbol.leading_comment_start());
    ProposedPosition::before(hinge_core::Range::new(symbol.true_start(), symbol.statement_end()), start)
}

/// Move `position` to column 0 when only whitespace precedes it, so text
/// inserted there brings its own indentation.
fn line_start_if_indented(document: &SourceDocument, position: Position) -> Position {
    let line = document.line_at(position.line);
    if position.character <= line.first_non_whitespace {
        Position::new(position.line, 0)
    } else {
        position
    }
}

/// After the last non-blank line above `before_line`, or the start of the
/// document if there is none.
fn after_last_code_line(document: &SourceDocument, before_line: u32) -> ProposedPosition {
    (0..before_line.min(document.line_count()))
        .rev()
        .map(|index| document.line_at(index))
        .find(|line| !line.is_empty_or_whitespace())
        .map_or_else(ProposedPosition::start_of_document, |line| {
            ProposedPosition::after(line.range, line.range.end)
        })
}
