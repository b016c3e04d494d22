//! Refactoring error types.
//!
//! Oracle misses stay `Option`s inside the engine; an action only fails
//! when the user asked for something that cannot be done, or when the
//! oracle's answers contradict each other.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefactorError {
    /// No symbol at the requested position.
    #[error("No symbol at {uri}:{line}:{character}")]
    NoSymbol { uri: String, line: u32, character: u32 },

    #[error("'{symbol}' is not a function declaration")]
    NotADeclaration { symbol: String },

    #[error("'{symbol}' is not a function definition")]
    NotADefinition { symbol: String },

    /// The declaration already has a definition somewhere.
    #[error("'{symbol}' is already defined at {uri}:{line}")]
    DefinitionExists { symbol: String, uri: String, line: u32 },

    #[error("'{symbol}' is not a member variable")]
    NotAMemberVariable { symbol: String },

    /// Setters are never generated for `const` members.
    #[error("'{symbol}' is const and cannot have a setter")]
    ConstMember { symbol: String },

    /// A linked declaration/definition does not name the symbol it was
    /// found for.
    #[error("Expected a counterpart named '{expected}', found '{found}'")]
    CrossReferenceMismatch { expected: String, found: String },

    #[error("{uri} already includes {include}")]
    AlreadyIncluded { uri: String, include: String },

    #[error("{uri} already has a header guard")]
    AlreadyGuarded { uri: String },

    /// A lexical transform could not make sense of the source text.
    #[error(transparent)]
    Parser(#[from] hinge_parser::ParserError),

    #[error(transparent)]
    Core(#[from] hinge_core::CoreError),
}
