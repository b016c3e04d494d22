//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use hinge_config::{BraceStyle, DefinitionLocation, GetterStyle, HeaderGuardStyle, HingeConfig};
use pretty_assertions::assert_eq;

fn from_toml(path: &str) -> figment::Result<HingeConfig> {
    Figment::from(Serialized::defaults(HingeConfig::default()))
        .merge(Toml::file(path))
        .extract()
}

#[test]
fn loads_formatting_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[formatting]
indent_width = 8
use_tabs = true
brace_style = "same_line"
blank_lines_between_definitions = false
indent_namespace_body = true
"#,
        )?;

        let config = from_toml("config.toml")?;
        assert_eq!(config.formatting.indent_width, 8);
        assert!(config.formatting.use_tabs);
        assert_eq!(config.formatting.indent_unit(), "\t");
        assert_eq!(config.formatting.brace_style, BraceStyle::SameLine);
        assert!(!config.formatting.blank_lines_between_definitions);
        assert!(config.formatting.indent_namespace_body);
        Ok(())
    });
}

#[test]
fn loads_header_guard_and_accessors_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[header_guard]
style = "pragma_once"
define_format = "${FILE_NAME}_${EXT}_INCLUDED"

[accessors]
getter_style = "get_prefix"
definition_location = "source_file"
"#,
        )?;

        let config = from_toml("config.toml")?;
        assert_eq!(config.header_guard.style, HeaderGuardStyle::PragmaOnce);
        assert_eq!(config.header_guard.define_format, "${FILE_NAME}_${EXT}_INCLUDED");
        assert_eq!(config.accessors.getter_style, GetterStyle::GetPrefix);
        assert_eq!(config.accessors.definition_location, DefinitionLocation::SourceFile);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_their_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\nmax_alias_depth = 2\n")?;

        let config = from_toml("config.toml")?;
        assert_eq!(config.general.max_alias_depth, 2);
        assert!(config.general.cross_file_type_resolution);
        assert_eq!(config.formatting.indent_width, 4);
        assert_eq!(config.header_guard.style, HeaderGuardStyle::Define);
        Ok(())
    });
}

#[test]
fn unknown_enum_values_fail_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[formatting]\nbrace_style = \"sideways\"\n")?;
        assert!(from_toml("config.toml").is_err());
        Ok(())
    });
}
