use hinge_core::{Range, SymbolKind};
use hinge_parser::{SourceSymbol, mask};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use super::after_symbol;
use crate::position::ProposedPosition;

static ACCESS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(public|protected|private)\s*:").expect("valid regex"));

/// C++ member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl Access {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }

    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Where a new member function goes, and whether it needs its own
/// access-specifier line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberPosition {
    pub position: ProposedPosition,
    pub needs_access_specifier: bool,
}

/// Propose where to declare a new member function of `class` with
/// `access`: after the last member function already under that access,
/// otherwise at the end of the body (behind an access specifier when the
/// access in effect there differs). Returns `None` when the class has no
/// braced body.
#[must_use]
pub fn find_position_for_new_member_function(class: &SourceSymbol<'_>, access: Access) -> Option<MemberPosition> {
    let document = class.document();
    let start = document.offset_at(class.range.start);
    let end = document.offset_at(class.range.end).max(start);
    let masked = mask::mask_comments_and_quotes(&document.text()[start..end]);
    let open = masked.find('{')?;
    let close = masked.rfind('}').filter(|&close| close > open)?;

    let body_offset = start + open + 1;
    let body = mask::mask_braces(&masked[open + 1..close]);
    let labels: Vec<(usize, Access)> = ACCESS_LABEL
        .captures_iter(&body)
        .filter(|caps| !body[caps.get(0).map_or(0, |m| m.end())..].starts_with(':'))
        .filter_map(|caps| {
            let keyword = caps.get(1)?;
            Some((body_offset + keyword.start(), Access::parse(keyword.as_str())?))
        })
        .collect();

    let default_access = if class.kind == SymbolKind::Struct {
        Access::Public
    } else {
        Access::Private
    };
    let access_at = |offset: usize| {
        labels
            .iter()
            .take_while(|(label, _)| *label < offset)
            .last()
            .map_or(default_access, |&(_, access)| access)
    };

    let children = class.children();
    if let Some(last_function) = children
        .iter()
        .filter(|child| child.is_function())
        .rfind(|child| access_at(document.offset_at(child.range.start)) == access)
    {
        return Some(MemberPosition {
            position: after_symbol(last_function).with_next_to(),
            needs_access_specifier: false,
        });
    }

    let needs_access_specifier = access_at(start + close) != access;
    let last_child = children.last();
    let last_label = labels.last().copied();
    let label_is_last = match (last_child, last_label) {
        (Some(child), Some((label, _))) => label > document.offset_at(child.statement_end()),
        (None, Some(_)) => true,
        _ => false,
    };

    let position = if label_is_last {
        let (label, _) = last_label?;
        let line = document.line_at(document.position_at(label).line);
        ProposedPosition::after(line.range, line.range.end)
            .with_next_to()
            .with_indent(true)
    } else if let Some(child) = last_child {
        after_symbol(child)
    } else {
        let brace = document.position_at(start + open + 1);
        ProposedPosition::inside_empty_scope(Range::new(class.true_start(), class.range.end), brace).with_indent(true)
    };
    tracing::debug!(class = %class.name, %access, needs_access_specifier, "member function goes at end of class");
    Some(MemberPosition {
        position,
        needs_access_specifier,
    })
}
