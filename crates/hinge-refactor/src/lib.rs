//! # hinge-refactor
//!
//! Refactorings for C++ source built on the refined symbols of
//! `hinge-parser`:
//! - [`proposal`]: where new definitions, includes, header guards and member
//!   functions should go, degrading through fallbacks
//! - [`format`]: fitting generated text into its surroundings
//! - [`accessor`]: getter and setter synthesis
//! - [`header_guard`]: guard detection and generation
//! - [`Refactorer`]: the actions that assemble [`hinge_core::WorkspaceEdit`]
//!   batches for an edit sink

pub mod accessor;
mod actions;
pub mod error;
pub mod format;
pub mod header_guard;
pub mod position;
pub mod proposal;

pub use accessor::{Accessor, AccessorKind};
pub use actions::Refactorer;
pub use error::RefactorError;
pub use format::format_text_to_insert;
pub use header_guard::{has_header_guard, header_guard_define_name, header_guard_edit, header_guard_text};
pub use position::{ProposedPosition, Side};
pub use proposal::{
    Access, IncludePositions, MemberPosition, SearchOptions, find_position_for_function_definition,
    find_position_for_new_header_guard, find_position_for_new_include, find_position_for_new_member_function,
};
