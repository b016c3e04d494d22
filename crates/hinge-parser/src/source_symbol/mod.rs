//! Symbols bound to the text of their document.
//!
//! A [`SourceSymbol`] pairs a tree node with the [`SourceDocument`] it was
//! scanned from and derives the ranges an oracle does not report: the true
//! start (template clause included), the start of the leading comment, and
//! the start of the body. Derived values are memoized on first use; the
//! document is never edited while a symbol refers to it.

mod primitive;
mod scope;
mod transform;

#[cfg(test)]
mod tests;

pub use primitive::ResolveOptions;
pub use scope::{Scope, TemplateParameter};
pub use transform::strip_default_values;

use hinge_core::{Location, Position, SourceDocument};
use regex::Regex;
use std::ops::Deref;
use std::sync::{LazyLock, OnceLock};

use crate::mask;
use crate::tree::SymbolRef;

static TEMPLATE_CLAUSE_AT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btemplate\s*<\s*>\s*$").expect("valid regex"));
static CONSTEXPR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bconstexpr\b").expect("valid regex"));
static INLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\binline\b").expect("valid regex"));
static STATIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bstatic\b").expect("valid regex"));
static CONST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bconst\b").expect("valid regex"));
static TYPEDEF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\btypedef\b").expect("valid regex"));
static USING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\busing\b").expect("valid regex"));

pub struct SourceSymbol<'a> {
    symbol: SymbolRef<'a>,
    document: &'a SourceDocument,
    true_start: OnceLock<Position>,
    leading_comment_start: OnceLock<Position>,
    parsable_text: OnceLock<String>,
}

impl std::fmt::Debug for SourceSymbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSymbol")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("uri", &self.document.uri())
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl<'a> Deref for SourceSymbol<'a> {
    type Target = SymbolRef<'a>;

    fn deref(&self) -> &SymbolRef<'a> {
        &self.symbol
    }
}

impl<'a> SourceSymbol<'a> {
    #[must_use]
    pub const fn new(symbol: SymbolRef<'a>, document: &'a SourceDocument) -> Self {
        Self {
            symbol,
            document,
            true_start: OnceLock::new(),
            leading_comment_start: OnceLock::new(),
            parsable_text: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn symbol(&self) -> SymbolRef<'a> {
        self.symbol
    }

    #[must_use]
    pub const fn document(&self) -> &'a SourceDocument {
        self.document
    }

    #[must_use]
    pub fn uri(&self) -> &'a str {
        self.document.uri()
    }

    /// Where to point the navigation oracle: the symbol's name.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.uri(), self.selection_range)
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.symbol.parent().map(|parent| Self::new(parent, self.document))
    }

    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.symbol
            .children()
            .map(|child| Self::new(child, self.document))
            .collect()
    }

    /// The source text covered by `range`.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.document.text_in(self.range)
    }

    /// [`Self::text`] with comments masked.
    #[must_use]
    pub fn parsable_text(&self) -> &str {
        self.parsable_text.get_or_init(|| mask::mask_comments(self.text()))
    }

    fn offset(&self, position: Position) -> usize {
        self.document.offset_at(position)
    }

    /// The start of the symbol including any `template <...>` clauses that
    /// precede its reported range.
    #[must_use]
    pub fn true_start(&self) -> Position {
        *self.true_start.get_or_init(|| {
            let start = self.offset(self.range.start);
            let preceding = &self.document.text()[..start];
            let masked = mask::mask_angle_brackets(&mask::mask_comments_and_quotes(preceding));
            let mut cut = masked.len();
            while let Some(found) = TEMPLATE_CLAUSE_AT_END.find(&masked[..cut]) {
                cut = found.start();
            }
            if cut == masked.len() {
                self.range.start
            } else {
                self.document.position_at(cut)
            }
        })
    }

    /// The start of the comment block directly above the symbol, or
    /// [`Self::true_start`] if there is none.
    #[must_use]
    pub fn leading_comment_start(&self) -> Position {
        *self.leading_comment_start.get_or_init(|| self.find_leading_comment_start())
    }

    fn find_leading_comment_start(&self) -> Position {
        let true_start = self.true_start();
        let start = self.offset(true_start);
        let masked = mask::mask_comments_keep_delimiters(&self.document.text()[..start]);
        let trimmed = masked.trim_end();

        if trimmed.ends_with("*/") {
            if let Some(open) = trimmed.rfind("/*") {
                let opening = self.document.position_at(open);
                let before = &self.document.line_at(opening.line).text;
                let prefix: String = before.chars().take(opening.character as usize).collect();
                if prefix.trim().is_empty() {
                    return opening;
                }
            }
            return true_start;
        }

        let line = self.document.line_at(true_start.line);
        let code_before: String = line.text.chars().take(true_start.character as usize).collect();
        if !code_before.trim().is_empty() {
            return true_start;
        }

        let mut found = true_start;
        for index in (0..true_start.line).rev() {
            let candidate = self.document.line_at(index);
            if !candidate.text.trim_start().starts_with("//") {
                break;
            }
            found = Position::new(index, candidate.first_non_whitespace);
        }
        found
    }

    /// Where the declaration-like prefix ends: the first `{` of the body, or
    /// for constructors the `:` that opens the member-initializer list.
    ///
    /// `counterpart` lets a definition borrow the constructor-ness of its
    /// declaration when the oracle reports the definition as a plain method.
    /// Returns `range.end` when no body is found.
    #[must_use]
    pub fn body_start(&self, counterpart: Option<&SourceSymbol<'_>>) -> Position {
        let start = self.offset(self.range.start);
        let text = self.text();
        let masked = mask::mask_parentheses(&mask::mask_comments_and_quotes(text));
        let Some(brace) = masked.find('{') else {
            return self.range.end;
        };

        let constructor = self.is_constructor() || counterpart.is_some_and(|other| other.is_constructor());
        if constructor
            && let Some(colon) = initializer_colon(&masked[..brace])
        {
            return self.document.position_at(start + colon);
        }
        self.document.position_at(start + brace)
    }

    /// `range.end` moved past any `;` that immediately follows it.
    #[must_use]
    pub fn statement_end(&self) -> Position {
        let text = self.document.text();
        let mut end = self.offset(self.range.end);
        let mut cursor = end;
        while let Some(&byte) = text.as_bytes().get(cursor) {
            match byte {
                b' ' | b'\t' => cursor += 1,
                b';' => {
                    cursor += 1;
                    end = cursor;
                }
                _ => break,
            }
        }
        self.document.position_at(end)
    }

    /// The leading whitespace of the line the symbol starts on.
    #[must_use]
    pub fn indentation(&self) -> &'a str {
        self.document.line_at(self.true_start().line).indentation()
    }

    #[must_use]
    pub fn is_function_declaration(&self) -> bool {
        self.is_function()
            && (self.detail.trim() == "declaration" || !self.parsable_text().trim_end().ends_with('}'))
    }

    #[must_use]
    pub fn is_function_definition(&self) -> bool {
        self.is_function() && !self.is_function_declaration()
    }

    /// Text from the true start up to the name, comments and literals masked.
    fn leading_text(&self) -> (usize, String) {
        let start = self.offset(self.true_start());
        let end = self.offset(self.selection_range.start).max(start);
        (start, mask::mask_comments_and_quotes(&self.document.text()[start..end]))
    }

    /// Text from the true start through any trailing `;`, with comments,
    /// literals and brace bodies masked.
    fn statement_text(&self) -> String {
        let start = self.offset(self.true_start());
        let end = self.offset(self.statement_end()).max(start);
        mask::mask_braces(&mask::mask_comments_and_quotes(&self.document.text()[start..end]))
    }

    #[must_use]
    pub fn is_constexpr(&self) -> bool {
        CONSTEXPR.is_match(&self.leading_text().1)
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        INLINE.is_match(&self.leading_text().1)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        STATIC.is_match(&mask::mask_angle_brackets(&self.leading_text().1))
    }

    #[must_use]
    pub fn is_pointer(&self) -> bool {
        mask::mask_angle_brackets(&self.leading_text().1).contains('*')
    }

    /// Whether the symbol itself is `const`: for pointers only a `const`
    /// after the last `*` counts.
    #[must_use]
    pub fn is_const(&self) -> bool {
        let leading = mask::mask_angle_brackets(&self.leading_text().1);
        let qualifiers = leading.rfind('*').map_or(leading.as_str(), |star| &leading[star + 1..]);
        CONST.is_match(qualifiers)
    }

    #[must_use]
    pub fn is_typedef(&self) -> bool {
        self.might_be_typedef_or_type_alias() && TYPEDEF.is_match(&self.statement_text())
    }

    #[must_use]
    pub fn is_type_alias(&self) -> bool {
        if !self.might_be_typedef_or_type_alias() {
            return false;
        }
        let statement = self.statement_text();
        USING.is_match(&statement) && statement.contains('=')
    }
}

/// A lone `:` (not part of `::`) after the parameter list.
fn initializer_colon(masked: &str) -> Option<usize> {
    let bytes = masked.as_bytes();
    let close = masked.find(')')?;
    (close + 1..bytes.len()).find(|&i| {
        bytes[i] == b':' && bytes.get(i + 1) != Some(&b':') && bytes.get(i.wrapping_sub(1)) != Some(&b':')
    })
}
