use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or a value did not deserialize.
    #[error("failed to load hinge configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A value deserialized but would produce malformed code.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
