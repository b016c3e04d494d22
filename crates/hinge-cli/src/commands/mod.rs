pub mod accessor;
pub mod declaration;
pub mod definition;
mod dispatch;
pub mod header_guard;
pub mod include;
pub mod mask;
pub mod symbols;

pub use dispatch::dispatch;

use hinge_core::{CoreError, Position, SourceDocument, Workspace};
use hinge_parser::{SymbolRef, SymbolTree};
use std::sync::Arc;

/// Open `uri` through the workspace or fail with the document's URI.
async fn open(workspace: &dyn Workspace, uri: &str) -> anyhow::Result<Arc<SourceDocument>> {
    workspace
        .open_document(uri)
        .await
        .ok_or_else(|| CoreError::DocumentNotFound { uri: uri.to_string() }.into())
}

async fn tree(workspace: &dyn Workspace, document: &SourceDocument) -> SymbolTree {
    SymbolTree::build(&workspace.document_symbols(document).await)
}

/// The symbol named at `position`, or failing that the innermost one
/// containing it.
fn symbol_at(tree: &SymbolTree, position: Position) -> Option<SymbolRef<'_>> {
    tree.symbol_at_selection(position).or_else(|| tree.symbol_at(position))
}
