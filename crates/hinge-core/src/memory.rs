//! In-memory implementations of the workspace interfaces.
//!
//! [`MemoryWorkspace`] serves documents, pre-recorded symbol outlines, and
//! navigation links from memory. It backs the offline CLI and the test
//! suites of the other crates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{
    CoreError, DocumentOpener, EditSink, Location, NavigationOracle, RawSymbol, SourceDocument,
    SymbolProvider, WorkspaceEdit,
};

/// A navigation answer: a query landing inside `from` resolves to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: Location,
    pub to: Location,
}

#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    documents: HashMap<String, Arc<SourceDocument>>,
    symbols: HashMap<String, Vec<RawSymbol>>,
    definitions: Vec<Link>,
    declarations: Vec<Link>,
}

impl MemoryWorkspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and return a shared handle to it.
    pub fn add_document(&mut self, uri: &str, text: &str) -> Arc<SourceDocument> {
        let document = Arc::new(SourceDocument::new(uri, text));
        self.documents.insert(uri.to_string(), Arc::clone(&document));
        document
    }

    pub fn set_symbols(&mut self, uri: &str, symbols: Vec<RawSymbol>) {
        self.symbols.insert(uri.to_string(), symbols);
    }

    pub fn link_definition(&mut self, from: Location, to: Location) {
        self.definitions.push(Link { from, to });
    }

    pub fn link_declaration(&mut self, from: Location, to: Location) {
        self.declarations.push(Link { from, to });
    }

    #[must_use]
    pub fn document(&self, uri: &str) -> Option<Arc<SourceDocument>> {
        self.documents.get(uri).cloned()
    }

    fn resolve(links: &[Link], location: &Location) -> Option<Location> {
        links
            .iter()
            .find(|link| link.from.uri == location.uri && link.from.range.contains(location.range.start))
            .map(|link| link.to.clone())
    }
}

#[async_trait]
impl SymbolProvider for MemoryWorkspace {
    async fn document_symbols(&self, document: &SourceDocument) -> Vec<RawSymbol> {
        self.symbols.get(document.uri()).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl NavigationOracle for MemoryWorkspace {
    async fn find_definition(&self, location: &Location) -> Option<Location> {
        Self::resolve(&self.definitions, location)
    }

    async fn find_declaration(&self, location: &Location) -> Option<Location> {
        Self::resolve(&self.declarations, location)
    }
}

#[async_trait]
impl DocumentOpener for MemoryWorkspace {
    async fn open_document(&self, uri: &str) -> Option<Arc<SourceDocument>> {
        self.document(uri)
    }
}

/// An edit sink that records every batch it accepts.
#[derive(Debug, Default)]
pub struct RecordingSink {
    applied: Mutex<Vec<WorkspaceEdit>>,
    reject_with: Option<String>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every batch with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            applied: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn applied(&self) -> Vec<WorkspaceEdit> {
        self.applied
            .lock()
            .map(|edits| edits.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EditSink for RecordingSink {
    async fn apply(&self, edit: WorkspaceEdit) -> Result<(), CoreError> {
        if let Some(reason) = &self.reject_with {
            return Err(CoreError::EditRejected {
                files: edit.file_count(),
                reason: reason.clone(),
            });
        }
        self.applied
            .lock()
            .map_err(|_| anyhow::anyhow!("edit log poisoned"))?
            .push(edit);
        Ok(())
    }
}
