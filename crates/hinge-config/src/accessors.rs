//! Getter/setter generation settings.

use serde::{Deserialize, Serialize};

/// How getter names are derived from a member's base name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GetterStyle {
    /// `m_value` -> `value()`, falling back to `getValue()` when the base
    /// name equals the member name.
    #[default]
    BaseName,
    /// Always `getValue()`.
    GetPrefix,
}

/// Where accessor bodies are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionLocation {
    /// Inside the class body.
    #[default]
    Inline,
    /// After the class, in the same file.
    BelowClass,
    /// In the matching source file.
    SourceFile,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessorConfig {
    #[serde(default)]
    pub getter_style: GetterStyle,

    #[serde(default)]
    pub definition_location: DefinitionLocation,
}
