//! Parser error types for hinge-parser.

/// Reasons a lexical transform declined to rewrite a symbol.
///
/// The public transforms fail soft (empty output); the `try_` variants
/// surface these so callers can tell the user why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("No parameter list found for '{symbol}'")]
    MissingParameterList { symbol: String },

    #[error("'{symbol}' is not a function")]
    NotAFunction { symbol: String },

    #[error("'{symbol}' is not a function definition")]
    NotADefinition { symbol: String },

    #[error("Symbol range of '{symbol}' does not cover its name")]
    InconsistentRange { symbol: String },
}
