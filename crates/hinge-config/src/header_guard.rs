//! Header-guard generation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderGuardStyle {
    PragmaOnce,
    #[default]
    Define,
    Both,
}

fn default_define_format() -> String {
    "${FILE_NAME}_${EXT}".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeaderGuardConfig {
    #[serde(default)]
    pub style: HeaderGuardStyle,

    /// Template for the guard macro. Supports `${FILE_NAME}`, `${EXT}` and
    /// `${DIR}`; the expansion is upper-cased and non-identifier characters
    /// become `_`.
    #[serde(default = "default_define_format")]
    pub define_format: String,
}

impl Default for HeaderGuardConfig {
    fn default() -> Self {
        Self {
            style: HeaderGuardStyle::default(),
            define_format: default_define_format(),
        }
    }
}

impl HeaderGuardStyle {
    #[must_use]
    pub const fn uses_pragma(self) -> bool {
        matches!(self, Self::PragmaOnce | Self::Both)
    }

    #[must_use]
    pub const fn uses_define(self) -> bool {
        matches!(self, Self::Define | Self::Both)
    }
}
