use hinge_core::{SourceDocument, TextLine};
use hinge_parser::{SourceSymbol, SymbolTree, mask};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::after_last_code_line;
use crate::position::ProposedPosition;

static INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#\s*include\s*([<"])"#).expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IncludeKind {
    System,
    Project,
}

#[derive(Debug, Clone, Copy)]
struct Block {
    kind: IncludeKind,
    last_line: u32,
    len: usize,
}

/// Where new `<system>` and `"project"` includes should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncludePositions {
    pub system: ProposedPosition,
    pub project: ProposedPosition,
}

/// Propose positions for new includes: the end of the largest contiguous
/// block of each kind (the earliest block on a tie).
///
/// With only one kind present both positions point at its block. Without
/// any includes, both land after the last line of code above the first
/// symbol.
#[must_use]
pub fn find_position_for_new_include(document: &SourceDocument, tree: &SymbolTree) -> IncludePositions {
    let masked = mask::mask_comments(document.text());
    let mut largest_system: Option<Block> = None;
    let mut largest_project: Option<Block> = None;
    let mut current: Option<Block> = None;

    let mut close = |block: Option<Block>| {
        let Some(block) = block else { return };
        let slot = match block.kind {
            IncludeKind::System => &mut largest_system,
            IncludeKind::Project => &mut largest_project,
        };
        if slot.is_none_or(|largest| block.len > largest.len) {
            *slot = Some(block);
        }
    };

    for (index, line) in (0u32..).zip(masked.split('\n')) {
        let kind = INCLUDE.captures(line).map(|caps| {
            if &caps[1] == "<" {
                IncludeKind::System
            } else {
                IncludeKind::Project
            }
        });
        match (kind, current.as_mut()) {
            (Some(kind), Some(block)) if block.kind == kind => {
                block.last_line = index;
                block.len += 1;
            }
            (Some(kind), _) => {
                close(current.take());
                current = Some(Block {
                    kind,
                    last_line: index,
                    len: 1,
                });
            }
            (None, _) => close(current.take()),
        }
    }
    close(current.take());

    let after_block = |block: Block| {
        let line: TextLine<'_> = document.line_at(block.last_line);
        ProposedPosition::after(line.range, line.range.end).with_next_to()
    };
    match (largest_system.map(after_block), largest_project.map(after_block)) {
        (Some(system), Some(project)) => IncludePositions { system, project },
        (Some(only), None) | (None, Some(only)) => IncludePositions {
            system: only,
            project: only,
        },
        (None, None) => {
            let first_code_line = tree.roots().next().map_or(document.line_count(), |first| {
                SourceSymbol::new(first, document).leading_comment_start().line
            });
            tracing::debug!(uri = %document.uri(), line = first_code_line, "no includes, placing above first symbol");
            let fallback = after_last_code_line(document, first_code_line);
            IncludePositions {
                system: fallback,
                project: fallback,
            }
        }
    }
}

/// Propose where a header guard opens: in front of the first code, below
/// any leading comments. An empty document gets it at its end.
#[must_use]
pub fn find_position_for_new_header_guard(document: &SourceDocument) -> ProposedPosition {
    let masked = mask::mask_comments(document.text());
    match masked.find(|c: char| !c.is_whitespace()) {
        Some(offset) => {
            let position = document.position_at(offset);
            let line = document.line_at(position.line);
            if position.character == line.first_non_whitespace {
                ProposedPosition::ahead_of(hinge_core::Position::new(position.line, 0))
            } else {
                ProposedPosition::ahead_of(position)
            }
        }
        None => ProposedPosition::at(document.end_position()),
    }
}
