use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `hinge` binary.
#[derive(Debug, Parser)]
#[command(name = "hinge", version, about = "Hinge - C++ refactorings without a compiler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Workspace snapshot (documents, outlines, navigation links) as JSON
    #[arg(short, long, global = true)]
    pub snapshot: Option<String>,

    /// Extra configuration file layered over the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            snapshot: self.snapshot.clone(),
            config: self.config.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use hinge_core::Position;

    use super::root_commands::{AccessorChoice, MaskKind};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hinge",
            "include-position",
            "file:///a.cpp",
            "--snapshot",
            "ws.json",
            "--format",
            "raw",
        ])
        .expect("cli should parse");

        let flags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Raw);
        assert_eq!(flags.snapshot.as_deref(), Some("ws.json"));
        assert!(matches!(cli.command, Commands::IncludePosition(_)));
    }

    #[test]
    fn positions_are_one_based() {
        let cli = Cli::try_parse_from(["hinge", "accessor", "file:///w.h", "7:9", "--kind", "both"])
            .expect("cli should parse");
        let Commands::Accessor(args) = cli.command else {
            panic!("expected accessor command");
        };
        assert_eq!(args.target.position, Position::new(6, 8));
        assert_eq!(args.kind, AccessorChoice::Both);
    }

    #[test]
    fn malformed_positions_are_rejected() {
        for position in ["7", "0:1", "a:b", "3:"] {
            let parsed = Cli::try_parse_from(["hinge", "declaration", "file:///w.cpp", position]);
            assert!(parsed.is_err(), "{position}");
        }
    }

    #[test]
    fn mask_defaults_to_comments_and_quotes() {
        let cli = Cli::try_parse_from(["hinge", "mask", "widget.h"]).expect("cli should parse");
        let Commands::Mask(args) = cli.command else {
            panic!("expected mask command");
        };
        assert_eq!(args.kind, MaskKind::CommentsAndQuotes);
    }
}
