use anyhow::Context;
use hinge_parser::mask;
use serde::Serialize;

use crate::cli::root_commands::{MaskArgs, MaskKind};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Debug, Serialize)]
struct MaskResponse<'a> {
    file: &'a str,
    kind: &'static str,
    text: String,
}

/// Handle `hinge mask`. Needs no snapshot or configuration.
pub fn handle(args: &MaskArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.file).with_context(|| format!("failed to read {}", args.file))?;
    let text = apply(args.kind, &source);
    tracing::debug!(file = %args.file, kind = kind_name(args.kind), "masked");

    if flags.format == OutputFormat::Raw {
        print!("{text}");
        return Ok(());
    }
    output(
        &MaskResponse {
            file: &args.file,
            kind: kind_name(args.kind),
            text,
        },
        flags.format,
    )
}

fn apply(kind: MaskKind, source: &str) -> String {
    match kind {
        MaskKind::Comments => mask::mask_comments(source),
        MaskKind::Quotes => mask::mask_quotes(source),
        MaskKind::CommentsAndQuotes => mask::mask_comments_and_quotes(source),
        MaskKind::Parentheses => mask::mask_parentheses(source),
        MaskKind::Brackets => mask::mask_brackets(source),
        MaskKind::Braces => mask::mask_braces(source),
        MaskKind::AngleBrackets => mask::mask_angle_brackets(source),
    }
}

const fn kind_name(kind: MaskKind) -> &'static str {
    match kind {
        MaskKind::Comments => "comments",
        MaskKind::Quotes => "quotes",
        MaskKind::CommentsAndQuotes => "comments-and-quotes",
        MaskKind::Parentheses => "parentheses",
        MaskKind::Brackets => "brackets",
        MaskKind::Braces => "braces",
        MaskKind::AngleBrackets => "angle-brackets",
    }
}
