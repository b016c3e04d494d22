//! # hinge-core
//!
//! Foundational types shared by every hinge crate:
//! - Line/character positions, ranges, and file locations
//! - The symbol kinds and raw symbol nodes handed over by a language oracle
//! - [`SourceDocument`], the line-indexed text accessor all scanning runs against
//! - Text edits batched per file for the edit sink
//! - The asynchronous oracle interfaces (symbols, navigation, document open)
//! - An in-memory workspace implementing those interfaces
//! - Cross-cutting error types

pub mod document;
pub mod edit;
pub mod errors;
pub mod memory;
pub mod position;
pub mod raw_symbol;
pub mod symbol_kind;
pub mod workspace;

pub use document::{SourceDocument, TextLine};
pub use edit::{TextEdit, WorkspaceEdit};
pub use errors::CoreError;
pub use position::{Location, Position, Range};
pub use raw_symbol::RawSymbol;
pub use symbol_kind::SymbolKind;
pub use workspace::{DocumentOpener, EditSink, NavigationOracle, SymbolProvider, Workspace};
