//! Workspace snapshots.
//!
//! A snapshot is a JSON file standing in for a live language server: the
//! documents to work on, the outline the server would report for each, and
//! the definition/declaration answers for the names involved.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hinge_core::RawSymbol;
use hinge_core::memory::{Link, MemoryWorkspace};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Snapshot {
    pub documents: Vec<SnapshotDocument>,
    #[serde(default)]
    pub definitions: Vec<Link>,
    #[serde(default)]
    pub declarations: Vec<Link>,
}

/// One document. Its text is given inline or read from `path`, which is
/// resolved against the snapshot's directory.
#[derive(Debug, Deserialize)]
pub struct SnapshotDocument {
    pub uri: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub symbols: Vec<RawSymbol>,
}

impl Snapshot {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("failed to parse snapshot {}", path.display()))
    }

    /// Load every document into an in-memory workspace.
    pub fn into_workspace(self, base: &Path) -> anyhow::Result<MemoryWorkspace> {
        let mut workspace = MemoryWorkspace::new();
        let count = self.documents.len();
        for document in self.documents {
            let text = match (document.text, &document.path) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    let resolved = base.join(path);
                    std::fs::read_to_string(&resolved)
                        .with_context(|| format!("failed to read {} for {}", resolved.display(), document.uri))?
                }
                (None, None) => anyhow::bail!("document {} has neither text nor path", document.uri),
            };
            workspace.add_document(&document.uri, &text);
            workspace.set_symbols(&document.uri, document.symbols);
        }
        for link in self.definitions {
            workspace.link_definition(link.from, link.to);
        }
        for link in self.declarations {
            workspace.link_declaration(link.from, link.to);
        }
        tracing::debug!(documents = count, base = %base.display(), "snapshot loaded");
        Ok(workspace)
    }
}

/// Load the snapshot named by `--snapshot`.
pub fn load(path: Option<&str>) -> anyhow::Result<MemoryWorkspace> {
    let Some(path) = path else {
        anyhow::bail!("this command needs a workspace snapshot (--snapshot <FILE>)");
    };
    let path = Path::new(path);
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Snapshot::read(path)?.into_workspace(base)
}
