//! Layout of generated code.

use serde::{Deserialize, Serialize};

/// Placement of the opening brace of a generated function body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BraceStyle {
    SameLine,
    #[default]
    NewLine,
}

const fn default_indent_width() -> usize {
    4
}

const fn default_blank_lines_between_definitions() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormattingConfig {
    /// Columns per indentation level when indenting with spaces.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Indent with a tab character instead of spaces.
    #[serde(default)]
    pub use_tabs: bool,

    #[serde(default)]
    pub brace_style: BraceStyle,

    /// Separate inserted definitions from their neighbours with a blank line.
    #[serde(default = "default_blank_lines_between_definitions")]
    pub blank_lines_between_definitions: bool,

    /// Indent code placed directly inside a namespace body.
    #[serde(default)]
    pub indent_namespace_body: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            use_tabs: false,
            brace_style: BraceStyle::default(),
            blank_lines_between_definitions: default_blank_lines_between_definitions(),
            indent_namespace_body: false,
        }
    }
}

impl FormattingConfig {
    /// One level of indentation as text.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }
}
