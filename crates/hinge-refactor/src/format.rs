//! Fitting generated text into the document around a proposed position.

use hinge_config::FormattingConfig;
use hinge_core::{Position, SourceDocument};
use hinge_parser::text::indent_lines;
use regex::Regex;
use std::sync::LazyLock;

use crate::position::{ProposedPosition, Side};

static ACCESS_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:public|protected|private)\s*:(?:[^:]|$)").expect("valid regex"));

/// Indent `text` for `proposed` and surround it with the line breaks that
/// separate it from its neighbours.
///
/// Lines take the indentation of the anchor's first line, one level more
/// when `indent` is set. Access-specifier lines sit one level shallower
/// than the lines they introduce. Definitions are separated by a blank line
/// unless `next_to` is set or blank lines are turned off in `formatting`.
/// A [`Side::Verbatim`] position gets `text` back unchanged.
#[must_use]
pub fn format_text_to_insert(
    text: &str,
    proposed: &ProposedPosition,
    document: &SourceDocument,
    formatting: &FormattingConfig,
) -> String {
    let eol = document.eol();
    let unit = formatting.indent_unit();
    let base = proposed
        .relative_to
        .map_or("", |anchor| document.line_at(anchor.start.line).indentation());
    let indent = if proposed.indent {
        format!("{base}{unit}")
    } else {
        base.to_string()
    };
    let content = dedent_access_specifiers(&indent_lines(text, &indent), &unit);

    let tight = proposed.next_to || !formatting.blank_lines_between_definitions;
    let separator = if tight { eol.to_string() } else { format!("{eol}{eol}") };

    if proposed.empty_scope {
        let closes_on_same_line = rest_of_line(document, proposed.position).trim_start().starts_with('}');
        return if closes_on_same_line {
            format!("{eol}{content}{eol}{base}")
        } else {
            format!("{eol}{content}")
        };
    }

    match proposed.side {
        Side::After => {
            let prefix = if proposed.position == Position::default() {
                ""
            } else {
                separator.as_str()
            };
            let following = following_line(document, proposed.position);
            let suffix = match following {
                Some(FollowingLine::SameLine) => separator.as_str(),
                Some(FollowingLine::Next(line)) if !tight && !line.trim_start().starts_with('}') => eol,
                _ => "",
            };
            format!("{prefix}{content}{suffix}")
        }
        Side::Before => {
            let preceding = preceding_line(document, proposed.position);
            let prefix = match preceding {
                Some(PrecedingLine::SameLine) => separator.as_str(),
                Some(PrecedingLine::Previous(line)) if !tight && !line.trim_end().ends_with('{') => eol,
                _ => "",
            };
            let has_code_after = !document.text()[document.offset_at(proposed.position)..].trim().is_empty();
            let suffix = if has_code_after { separator.as_str() } else { eol };
            format!("{prefix}{content}{suffix}")
        }
        Side::Verbatim => text.to_string(),
    }
}

fn dedent_access_specifiers(text: &str, unit: &str) -> String {
    text.split('\n')
        .map(|line| {
            if ACCESS_SPECIFIER.is_match(line) {
                line.strip_prefix(unit).unwrap_or(line)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rest_of_line(document: &SourceDocument, position: Position) -> String {
    document
        .line_at(position.line)
        .text
        .chars()
        .skip(position.character as usize)
        .collect()
}

enum FollowingLine<'d> {
    /// Code continues on the insertion line itself.
    SameLine,
    Next(&'d str),
}

/// The first non-blank text after `position`, if any.
fn following_line(document: &SourceDocument, position: Position) -> Option<FollowingLine<'_>> {
    if !rest_of_line(document, position).trim().is_empty() {
        return Some(FollowingLine::SameLine);
    }
    (position.line + 1..document.line_count())
        .map(|line| document.line_at(line).text)
        .next()
        .filter(|line| !line.trim().is_empty())
        .map(FollowingLine::Next)
}

enum PrecedingLine<'d> {
    SameLine,
    Previous(&'d str),
}

/// The code before `position` on its line, or else the line above when it
/// is not blank.
fn preceding_line(document: &SourceDocument, position: Position) -> Option<PrecedingLine<'_>> {
    let line = document.line_at(position.line);
    let before: String = line.text.chars().take(position.character as usize).collect();
    if !before.trim().is_empty() {
        return Some(PrecedingLine::SameLine);
    }
    position
        .line
        .checked_sub(1)
        .map(|previous| document.line_at(previous).text)
        .filter(|text| !text.trim().is_empty())
        .map(PrecedingLine::Previous)
}
