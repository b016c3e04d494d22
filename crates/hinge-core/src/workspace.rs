//! Interfaces to the external language oracle and editor.
//!
//! Every method may suspend while the collaborator does I/O. A miss is
//! reported as `None` (or an empty symbol list), never as an error.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{CoreError, Location, RawSymbol, SourceDocument, WorkspaceEdit};

/// Supplies the symbol outline of a document.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    async fn document_symbols(&self, document: &SourceDocument) -> Vec<RawSymbol>;
}

/// Cross-file "go to definition / declaration".
#[async_trait]
pub trait NavigationOracle: Send + Sync {
    async fn find_definition(&self, location: &Location) -> Option<Location>;
    async fn find_declaration(&self, location: &Location) -> Option<Location>;
}

/// Opens (or returns the already-open) document for a file.
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    async fn open_document(&self, uri: &str) -> Option<Arc<SourceDocument>>;
}

/// Everything the analysis core consumes from its environment.
pub trait Workspace: SymbolProvider + NavigationOracle + DocumentOpener {}

impl<T> Workspace for T where T: SymbolProvider + NavigationOracle + DocumentOpener + ?Sized {}

/// Applies a batch of edits atomically, or rejects the whole batch.
#[async_trait]
pub trait EditSink: Send + Sync {
    async fn apply(&self, edit: WorkspaceEdit) -> Result<(), CoreError>;
}
