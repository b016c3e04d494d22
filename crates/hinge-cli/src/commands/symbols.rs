use std::collections::HashMap;

use hinge_config::HingeConfig;
use hinge_core::{Position, Range, SymbolKind, Workspace};
use hinge_parser::{ResolveOptions, SourceSymbol, SymbolId};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UriArgs;
use crate::output::output;

/// One refined outline entry: what the oracle reported plus the ranges and
/// traits derived from the text.
#[derive(Debug, Serialize)]
struct SymbolEntry {
    name: String,
    kind: SymbolKind,
    range: Range,
    selection_range: Range,
    true_start: Position,
    leading_comment_start: Position,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scope: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    traits: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<SymbolEntry>,
}

#[derive(Debug, Serialize)]
struct SymbolsResponse {
    uri: String,
    symbols: Vec<SymbolEntry>,
}

/// Handle `hinge symbols`.
pub async fn handle(
    args: &UriArgs,
    workspace: &dyn Workspace,
    config: &HingeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let document = super::open(workspace, &args.uri).await?;
    let tree = super::tree(workspace, &document).await;

    let options = ResolveOptions {
        cross_file: config.general.cross_file_type_resolution,
        max_depth: config.general.max_alias_depth,
    };
    let mut primitive = HashMap::new();
    for symbol in tree.iter().into_iter().filter(|symbol| symbol.is_variable()) {
        let source = SourceSymbol::new(symbol, &document);
        primitive.insert(symbol.id(), source.is_primitive(workspace, &options).await);
    }

    let symbols = tree
        .roots()
        .map(|root| entry(&SourceSymbol::new(root, &document), &primitive))
        .collect();
    tracing::debug!(uri = %args.uri, count = tree.len(), "outline refined");
    output(
        &SymbolsResponse {
            uri: args.uri.clone(),
            symbols,
        },
        flags.format,
    )
}

fn entry(symbol: &SourceSymbol<'_>, primitive: &HashMap<SymbolId, bool>) -> SymbolEntry {
    SymbolEntry {
        name: symbol.name.clone(),
        kind: symbol.kind,
        range: symbol.range,
        selection_range: symbol.selection_range,
        true_start: symbol.true_start(),
        leading_comment_start: symbol.leading_comment_start(),
        scope: symbol.scope_names(),
        traits: traits(symbol, primitive.get(&symbol.id()).copied().unwrap_or(false)),
        children: symbol
            .children()
            .iter()
            .map(|child| entry(child, primitive))
            .collect(),
    }
}

fn traits(symbol: &SourceSymbol<'_>, primitive: bool) -> Vec<&'static str> {
    [
        (symbol.is_function_declaration(), "declaration"),
        (symbol.is_function_definition(), "definition"),
        (symbol.is_constructor(), "constructor"),
        (symbol.is_destructor(), "destructor"),
        (symbol.is_member_variable(), "member"),
        (symbol.is_static(), "static"),
        (symbol.is_inline(), "inline"),
        (symbol.is_constexpr(), "constexpr"),
        (symbol.is_variable() && symbol.is_const(), "const"),
        (symbol.is_variable() && symbol.is_pointer(), "pointer"),
        (primitive, "primitive"),
        (symbol.is_typedef() || symbol.is_type_alias(), "alias"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect()
}
