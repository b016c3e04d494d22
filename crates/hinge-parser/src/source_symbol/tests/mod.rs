use hinge_core::{Position, Range, RawSymbol, SourceDocument, SymbolKind};

use super::*;
pub(super) use crate::tree::SymbolTree;

mod body_start_tests;
mod predicate_tests;
mod primitive_tests;
mod transform_tests;

fn offset_of(text: &str, needle: &str, from: usize) -> usize {
    text[from..]
        .find(needle)
        .map(|index| from + index)
        .unwrap_or_else(|| panic!("{needle:?} not found after byte {from} in:\n{text}"))
}

/// A raw symbol spanning from the first `from` to the end of the first
/// `through` after it. The selection is the first occurrence of `name`
/// inside that span that is not immediately followed by `::`.
fn raw(document: &SourceDocument, name: &str, kind: SymbolKind, from: &str, through: &str) -> RawSymbol {
    raw_after(document, name, kind, from, through, 0)
}

fn raw_after(
    document: &SourceDocument,
    name: &str,
    kind: SymbolKind,
    from: &str,
    through: &str,
    skip: usize,
) -> RawSymbol {
    let text = document.text();
    let start = offset_of(text, from, skip);
    let end = offset_of(text, through, start) + through.len();
    let short_name = name.rsplit("::").next().unwrap_or(name);
    let mut cursor = start;
    let name_start = loop {
        let found = offset_of(text, short_name, cursor);
        if !text[found + short_name.len()..].starts_with("::") {
            break found;
        }
        cursor = found + short_name.len();
    };
    let range = Range::new(document.position_at(start), document.position_at(end));
    let selection = Range::new(
        document.position_at(name_start),
        document.position_at(name_start + short_name.len()),
    );
    RawSymbol::new(name, kind, range, selection)
}

fn position_of(document: &SourceDocument, needle: &str) -> Position {
    document.position_at(offset_of(document.text(), needle, 0))
}

/// Build a tree and return the symbol named `name` (pre-order, first hit).
fn find<'t>(tree: &'t SymbolTree, document: &'t SourceDocument, name: &str) -> SourceSymbol<'t> {
    let symbol = tree
        .iter()
        .into_iter()
        .find(|symbol| symbol.name == name)
        .unwrap_or_else(|| {
            let available: Vec<_> = tree.iter().iter().map(|s| format!("{}: {}", s.kind, s.name)).collect();
            panic!("symbol {name:?} not found. Available:\n{}", available.join("\n"))
        });
    SourceSymbol::new(symbol, document)
}

fn nth<'t>(tree: &'t SymbolTree, document: &'t SourceDocument, name: &str, n: usize) -> SourceSymbol<'t> {
    let symbol = tree
        .iter()
        .into_iter()
        .filter(|symbol| symbol.name == name)
        .nth(n)
        .unwrap_or_else(|| panic!("occurrence {n} of {name:?} not found"));
    SourceSymbol::new(symbol, document)
}
