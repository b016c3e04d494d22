//! Header-guard detection and generation.

use hinge_config::{FormattingConfig, HeaderGuardConfig, HeaderGuardStyle};
use hinge_core::{SourceDocument, SymbolKind, WorkspaceEdit};
use hinge_parser::{SymbolTree, mask};

use crate::format::format_text_to_insert;
use crate::position::Side;
use crate::proposal::find_position_for_new_header_guard;

/// Whether `document` is already guarded: it opens with `#pragma once`, or
/// its first symbol is the guard macro `define_format` expands to.
#[must_use]
pub fn has_header_guard(document: &SourceDocument, tree: &SymbolTree, define_format: &str) -> bool {
    let masked = mask::mask_comments(document.text());
    let mut first_code = masked.split_whitespace();
    if first_code.next() == Some("#pragma") && first_code.next() == Some("once") {
        return true;
    }
    let expected = header_guard_define_name(document.uri(), define_format);
    tree.roots().next().is_some_and(|first| {
        matches!(first.kind, SymbolKind::Constant | SymbolKind::Variable) && first.name == expected
    })
}

/// Expand `format` for the file at `uri`.
///
/// `${FILE_NAME}`, `${EXT}` and `${DIR}` are replaced by the file stem, its
/// extension and the name of its directory. The result is upper-cased,
/// every character that cannot appear in an identifier becomes `_`, and a
/// leading digit gets a `_` in front.
#[must_use]
pub fn header_guard_define_name(uri: &str, format: &str) -> String {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    let mut segments = path.rsplit(['/', '\\']);
    let file = segments.next().unwrap_or_default();
    let directory = segments.next().unwrap_or_default();
    let (stem, extension) = file.rsplit_once('.').unwrap_or((file, ""));

    let expanded = format
        .replace("${FILE_NAME}", stem)
        .replace("${EXT}", extension)
        .replace("${DIR}", directory);
    let mut name: String = expanded
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// The opening and closing lines of a guard in `style`.
#[must_use]
pub fn header_guard_text(define: &str, style: HeaderGuardStyle, eol: &str) -> (String, String) {
    let mut opening = Vec::new();
    if style.uses_pragma() {
        opening.push("#pragma once".to_string());
    }
    if style.uses_define() {
        opening.push(format!("#ifndef {define}"));
        opening.push(format!("#define {define}"));
    }
    let closing = if style.uses_define() {
        format!("#endif // {define}")
    } else {
        String::new()
    };
    (opening.join(eol), closing)
}

/// Edits that wrap `document` in a header guard.
///
/// The guard opens in front of the first code (below a leading license
/// comment) and, for `#define` guards, closes on the last line. A file with
/// no code gets the whole guard appended in one insert.
#[must_use]
pub fn header_guard_edit(
    document: &SourceDocument,
    config: &HeaderGuardConfig,
    formatting: &FormattingConfig,
) -> WorkspaceEdit {
    let eol = document.eol();
    let define = header_guard_define_name(document.uri(), &config.define_format);
    let (opening, closing) = header_guard_text(&define, config.style, eol);

    let mut edit = WorkspaceEdit::new();
    let text = document.text();
    let proposed = find_position_for_new_header_guard(document);

    if proposed.side == Side::Verbatim {
        // No code: opening and closing both go at the end, as one insert.
        let lead = if text.is_empty() {
            String::new()
        } else if text.ends_with('\n') {
            eol.to_string()
        } else {
            format!("{eol}{eol}")
        };
        let guard = if closing.is_empty() {
            format!("{lead}{opening}{eol}")
        } else {
            format!("{lead}{opening}{eol}{eol}{closing}{eol}")
        };
        edit.insert(document.uri(), proposed.position, guard);
        return edit;
    }

    let opening = format_text_to_insert(&opening, &proposed, document, formatting);
    edit.insert(document.uri(), proposed.position, opening);

    if !closing.is_empty() {
        let lead = if text.ends_with('\n') {
            eol.to_string()
        } else {
            format!("{eol}{eol}")
        };
        edit.insert(document.uri(), document.end_position(), format!("{lead}{closing}{eol}"));
    }
    edit
}
