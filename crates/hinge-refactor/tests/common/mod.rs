//! Outline fixtures written against real source text.

#![allow(dead_code)]

use hinge_core::{Location, Position, Range, RawSymbol, SourceDocument, SymbolKind};

/// A symbol spanning from the first `from` to the end of the first
/// `through` after it. Functions are named at the first `name(` in between,
/// everything else at the first `name`.
pub fn span(document: &SourceDocument, name: &str, kind: SymbolKind, from: &str, through: &str) -> RawSymbol {
    let text = document.text();
    let start = text.find(from).unwrap_or_else(|| panic!("{from:?} not in {}", document.uri()));
    let end = start
        + text[start..]
            .find(through)
            .unwrap_or_else(|| panic!("{through:?} not after {from:?}"))
        + through.len();
    let short = name.rsplit("::").next().unwrap_or(name);
    let is_function = matches!(
        kind,
        SymbolKind::Function | SymbolKind::Method | SymbolKind::Constructor | SymbolKind::Operator
    );
    let name_start = start
        + is_function
            .then(|| text[start..end].find(&format!("{short}(")))
            .flatten()
            .or_else(|| text[start..end].find(short))
            .unwrap_or(0);
    RawSymbol::new(
        name,
        kind,
        Range::new(document.position_at(start), document.position_at(end)),
        Range::new(document.position_at(name_start), document.position_at(name_start + short.len())),
    )
}

/// Where the oracle should be pointed for `symbol`.
pub fn at(document: &SourceDocument, symbol: &RawSymbol) -> Location {
    Location::new(document.uri(), symbol.selection_range)
}

/// The position of the first `needle` in `document`.
pub fn position_of(document: &SourceDocument, needle: &str) -> Position {
    let offset = document
        .text()
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not in {}", document.uri()));
    document.position_at(offset)
}
