//! Analysis behaviour shared by every refactoring.

use serde::{Deserialize, Serialize};

const fn default_cross_file_type_resolution() -> bool {
    true
}

/// Default depth limit when following typedef/alias chains across files.
const fn default_max_alias_depth() -> u32 {
    8
}

/// Default number of siblings checked on each side of a declaration.
const fn default_sibling_search_limit() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Whether primitive-type checks may ask the oracle to resolve a type in other files.
    #[serde(default = "default_cross_file_type_resolution")]
    pub cross_file_type_resolution: bool,

    /// Upper bound on typedef/alias hops during cross-file resolution.
    #[serde(default = "default_max_alias_depth")]
    pub max_alias_depth: u32,

    /// Siblings examined before and after a declaration when placing its definition.
    #[serde(default = "default_sibling_search_limit")]
    pub sibling_search_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cross_file_type_resolution: default_cross_file_type_resolution(),
            max_alias_depth: default_max_alias_depth(),
            sibling_search_limit: default_sibling_search_limit(),
        }
    }
}
