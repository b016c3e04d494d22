//! # hinge-parser
//!
//! Lexical analysis of C++ source for hinge, without a C++ grammar.
//!
//! The oracle supplies a coarse outline; this crate refines it:
//! - [`mask`]: equal-length masking of comments, literals and nested groups,
//!   so regex scans see only top-level code while offsets stay valid
//! - [`tree`]: a normalized, sorted, parent-linked [`SymbolTree`]
//! - [`source_symbol`]: [`SourceSymbol`], a tree node bound to its document
//!   with derived ranges, semantic predicates, primitive-type resolution,
//!   scope qualification, and the declaration ⇄ definition transforms

pub mod error;
pub mod mask;
pub mod names;
pub mod source_symbol;
pub mod text;
pub mod tree;

pub use error::ParserError;
pub use source_symbol::{ResolveOptions, Scope, SourceSymbol, TemplateParameter, strip_default_values};
pub use tree::{Symbol, SymbolId, SymbolRef, SymbolTree};
