use clap::{Args, Subcommand, ValueEnum};
use hinge_core::Position;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print a source file with comments, literals or nested groups blanked out.
    Mask(MaskArgs),
    /// Show the refined symbol tree of a document.
    Symbols(UriArgs),
    /// Show where new system and project includes would go.
    IncludePosition(UriArgs),
    /// Add an include directive.
    Include(IncludeArgs),
    /// Check for or add a header guard.
    HeaderGuard(HeaderGuardArgs),
    /// Add (or move) the definition of a function.
    Definition(DefinitionArgs),
    /// Print the in-class declaration for a function definition.
    Declaration(TargetArgs),
    /// Generate a getter and/or setter for a member variable.
    Accessor(AccessorArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MaskKind {
    Comments,
    Quotes,
    CommentsAndQuotes,
    Parentheses,
    Brackets,
    Braces,
    AngleBrackets,
}

#[derive(Clone, Debug, Args)]
pub struct MaskArgs {
    /// Source file to read.
    pub file: String,

    /// What to blank out.
    #[arg(long, value_enum, default_value_t = MaskKind::CommentsAndQuotes)]
    pub kind: MaskKind,
}

#[derive(Clone, Debug, Args)]
pub struct UriArgs {
    /// Document URI as it appears in the snapshot.
    pub uri: String,
}

/// A document and a `LINE:COLUMN` position inside it (both 1-based).
#[derive(Clone, Debug, Args)]
pub struct TargetArgs {
    pub uri: String,

    #[arg(value_parser = parse_position)]
    pub position: Position,
}

#[derive(Clone, Debug, Args)]
pub struct IncludeArgs {
    pub uri: String,

    /// Header to include, e.g. `vector` or `widget.h`.
    pub path: String,

    /// Use angle brackets.
    #[arg(long)]
    pub system: bool,
}

#[derive(Clone, Debug, Args)]
pub struct HeaderGuardArgs {
    pub uri: String,

    /// Only report whether the header is guarded.
    #[arg(long)]
    pub check: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DefinitionArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Document that receives the definition (defaults to the same document).
    #[arg(long)]
    pub into: Option<String>,

    /// Move an existing definition instead of adding an empty one.
    #[arg(long = "move")]
    pub move_definition: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum AccessorChoice {
    Getter,
    Setter,
    Both,
}

#[derive(Clone, Debug, Args)]
pub struct AccessorArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long, value_enum, default_value_t = AccessorChoice::Getter)]
    pub kind: AccessorChoice,
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (line, column) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got '{value}'"))?;
    let parse = |part: &str, what: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .ok_or_else(|| format!("invalid {what} '{part}' (1-based)"))
    };
    Ok(Position::new(parse(line, "line")?, parse(column, "column")?))
}
