//! # hinge-config
//!
//! Layered configuration loading for hinge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HINGE_*` prefix, `__` as separator)
//! 2. Project-level `.hinge/config.toml`
//! 3. User-level `~/.config/hinge/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HINGE_FORMATTING__BRACE_STYLE` -> `formatting.brace_style`,
//! `HINGE_GENERAL__MAX_ALIAS_DEPTH` -> `general.max_alias_depth`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hinge_config::HingeConfig;
//!
//! let config = HingeConfig::load_with_dotenv().expect("config");
//! if config.general.cross_file_type_resolution {
//!     println!("resolving types through the oracle");
//! }
//! ```

mod accessors;
mod error;
mod formatting;
mod general;
mod header_guard;

pub use accessors::{AccessorConfig, DefinitionLocation, GetterStyle};
pub use error::ConfigError;
pub use formatting::{BraceStyle, FormattingConfig};
pub use general::GeneralConfig;
pub use header_guard::{HeaderGuardConfig, HeaderGuardStyle};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HingeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub formatting: FormattingConfig,
    #[serde(default)]
    pub header_guard: HeaderGuardConfig,
    #[serde(default)]
    pub accessors: AccessorConfig,
}

impl HingeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".hinge/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("HINGE_").split("__"))
    }

    /// Reject values that would make generated code malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.formatting.use_tabs && self.formatting.indent_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "formatting.indent_width".to_string(),
                reason: "must be at least 1 when indenting with spaces".to_string(),
            });
        }
        if self.header_guard.define_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "header_guard.define_format".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hinge").join("config.toml"))
    }
}
