//! Deciding whether a variable's type (or an alias target) is primitive.
//!
//! Built-in type keywords are matched lexically. A named type is resolved
//! through the navigation oracle: enums are primitive, typedefs and aliases
//! are followed, anything else is not. Alias chains are followed at most
//! `max_depth` hops and never through the same declaration twice.

use async_recursion::async_recursion;
use hinge_core::{Location, Position, Range, SymbolKind, Workspace};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::SourceSymbol;
use crate::mask;
use crate::tree::SymbolTree;

static BUILTIN_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:void|bool|char|wchar_t|char8_t|char16_t|char32_t|short|int|long|signed|unsigned|float|double|size_t|ssize_t|ptrdiff_t|intptr_t|uintptr_t|intmax_t|uintmax_t|nullptr_t|u?int(?:_fast|_least)?(?:8|16|32|64)_t)\b",
    )
    .expect("valid regex")
});

static QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:static|const|constexpr|constinit|volatile|mutable|inline|extern|thread_local|register|typedef|using|typename|struct|class|union|enum)\b",
    )
    .expect("valid regex")
});

static TYPE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z_]\w*\s*(?:<\s*>)?\s*::\s*)*([A-Za-z_]\w*)").expect("valid regex")
});

/// Controls cross-file resolution in [`SourceSymbol::is_primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Ask the oracle about named types. When off, only built-in keywords
    /// count as primitive.
    pub cross_file: bool,
    /// Maximum number of typedef/alias hops to follow.
    pub max_depth: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            cross_file: true,
            max_depth: 8,
        }
    }
}

/// What the type text of a symbol turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TypeShape {
    Builtin,
    Named(Location),
    Unknown,
}

impl SourceSymbol<'_> {
    /// Whether this variable, typedef, or type alias has a primitive type.
    ///
    /// Suspends on the oracle only when the type is not a built-in keyword
    /// and `options.cross_file` is set.
    pub async fn is_primitive(&self, workspace: &dyn Workspace, options: &ResolveOptions) -> bool {
        if !(self.is_variable() || self.is_typedef() || self.is_type_alias()) {
            return false;
        }
        match self.type_shape() {
            TypeShape::Builtin => true,
            TypeShape::Named(location) if options.cross_file => {
                let mut visited = HashSet::new();
                resolve_named_type(workspace, location, options, &mut visited, 0).await
            }
            TypeShape::Named(_) | TypeShape::Unknown => false,
        }
    }

    /// The text naming this symbol's type, and its byte offset.
    fn type_text(&self) -> Option<(usize, &str)> {
        let text = self.document.text();
        let start = self.offset(self.true_start());
        let name_start = self.offset(self.selection_range.start).max(start);
        let name_end = self.offset(self.selection_range.end).max(name_start);

        if self.is_type_alias() {
            let end = self.offset(self.statement_end()).max(name_end);
            let after_name = mask::mask_comments_and_quotes(&text[name_end..end]);
            let equals = after_name.find('=')?;
            let from = name_end + equals + 1;
            return Some((from, text[from..end].trim_end_matches([';', ' ', '\t', '\n', '\r'])));
        }
        if self.is_typedef() {
            let leading = mask::mask_comments_and_quotes(&text[start..name_start]);
            let keyword = super::TYPEDEF.find(&leading)?;
            let from = start + keyword.end();
            return Some((from, &text[from..name_start]));
        }
        Some((start, &text[start..name_start]))
    }

    fn type_shape(&self) -> TypeShape {
        let Some((offset, text)) = self.type_text() else {
            return TypeShape::Unknown;
        };
        let masked = mask::mask_comments_and_quotes(text);
        let masked = QUALIFIER.replace_all(&masked, |caps: &regex::Captures<'_>| " ".repeat(caps[0].len()));
        let masked = mask::mask_angle_brackets(&masked);
        if BUILTIN_TYPE.is_match(&masked) {
            return TypeShape::Builtin;
        }
        TYPE_NAME
            .captures(&masked)
            .and_then(|caps| caps.get(1))
            .map_or(TypeShape::Unknown, |name| {
                let position: Position = self.document.position_at(offset + name.start());
                TypeShape::Named(Location::new(self.uri(), Range::at(position)))
            })
    }
}

/// Follow a named type to its declaration and classify it.
#[async_recursion]
async fn resolve_named_type(
    workspace: &dyn Workspace,
    reference: Location,
    options: &ResolveOptions,
    visited: &mut HashSet<Location>,
    depth: u32,
) -> bool {
    if depth >= options.max_depth {
        tracing::debug!(uri = %reference.uri, line = reference.range.start.line, depth, "alias chain too deep");
        return false;
    }
    let Some(declaration) = workspace.find_declaration(&reference).await else {
        tracing::debug!(uri = %reference.uri, line = reference.range.start.line, "no declaration for type");
        return false;
    };
    if !visited.insert(declaration.clone()) {
        tracing::debug!(uri = %declaration.uri, "alias cycle");
        return false;
    }
    let Some(document) = workspace.open_document(&declaration.uri).await else {
        tracing::debug!(uri = %declaration.uri, "could not open type declaration");
        return false;
    };

    let raw = workspace.document_symbols(&document).await;
    let tree = SymbolTree::build(&raw);
    let Some(symbol) = tree
        .symbol_at_selection(declaration.range.start)
        .or_else(|| tree.symbol_at(declaration.range.start))
    else {
        return false;
    };
    let target = SourceSymbol::new(symbol, &document);

    if target.kind == SymbolKind::Enum {
        return true;
    }
    if !(target.is_typedef() || target.is_type_alias()) {
        return false;
    }
    match target.type_shape() {
        TypeShape::Builtin => true,
        TypeShape::Named(next) => resolve_named_type(workspace, next, options, visited, depth + 1).await,
        TypeShape::Unknown => false,
    }
}
