//! Cross-cutting error types for hinge.
//!
//! Lookup misses are never errors: oracles return `Option` and callers fall
//! back. The errors here cover the collaborators that can genuinely fail.
//! Domain-specific errors (`ParserError`, `RefactorError`) live in their
//! respective crates.

use thiserror::Error;

/// Errors that can be raised by any hinge crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document required by an operation could not be opened.
    #[error("Document not found: {uri}")]
    DocumentNotFound { uri: String },

    /// The edit sink refused a batch; none of its edits were applied.
    #[error("Edit rejected across {files} file(s): {reason}")]
    EditRejected { files: usize, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
