//! Declaration ⇄ definition text transforms.

use hinge_core::{Position, SourceDocument, Workspace};
use regex::Regex;
use std::sync::LazyLock;

use super::{Scope, SourceSymbol};
use crate::error::ParserError;
use crate::mask;
use crate::text::{leading_whitespace, reindent_continuation_lines, shift_lines};

static SPECIAL_MEMBER_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*=\s*(?:0|default|delete)\s*$").expect("valid regex"));
static LEADING_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:virtual|static|explicit|friend)\b\s*").expect("valid regex"));
static TRAILING_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\b(?:override|final)\b").expect("valid regex"));
static QUALIFIER_AT_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z_]\w*\s*(?:<\s*>)?\s*::\s*)+$").expect("valid regex")
});
static TEMPLATE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*template\s*<").expect("valid regex"));

/// Remove default values from a parameter list, keeping everything else.
///
/// Commas and `=` inside nested groups, template arguments, comparisons and
/// literals are ignored, so only top-level defaults are cut.
///
/// ```
/// use hinge_parser::source_symbol::strip_default_values;
///
/// assert_eq!(
///     strip_default_values("int a = 1, std::vector<int> b = {1,2}, int c"),
///     "int a, std::vector<int> b, int c"
/// );
/// ```
#[must_use]
pub fn strip_default_values(parameters: &str) -> String {
    let masked = mask::mask_for_parameter_scan(parameters);
    let mut segments = Vec::new();
    let mut start = 0;
    for end in masked
        .match_indices(',')
        .map(|(index, _)| index)
        .chain(std::iter::once(parameters.len()))
    {
        let segment = &parameters[start..end];
        match masked[start..end].find('=') {
            Some(equals) => {
                let trailing = &segment[segment.trim_end().len()..];
                segments.push(format!("{}{trailing}", segment[..equals].trim_end()));
            }
            None => segments.push(segment.to_string()),
        }
        start = end + 1;
    }
    segments.join(",")
}

/// A span of text to drop or replace while rebuilding a signature.
struct Splice {
    start: usize,
    end: usize,
    replacement: String,
}

fn apply_splices(text: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by_key(|splice| splice.start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for splice in splices {
        if splice.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..splice.start]);
        out.push_str(&splice.replacement);
        cursor = splice.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Display width of the last line of `prefix` once continuation lines have
/// lost `base` indentation.
fn column_after_dedent(prefix: &str, base: &str) -> usize {
    match prefix.rfind('\n') {
        Some(newline) => {
            let line = &prefix[newline + 1..];
            let rest = line.strip_prefix(base).unwrap_or_else(|| {
                let present = leading_whitespace(line).len();
                &line[present.min(base.len())..]
            });
            rest.chars().count()
        }
        None => prefix.chars().count(),
    }
}

impl SourceSymbol<'_> {
    /// The declaration-like prefix, from the true start up to the body, and
    /// its byte offset in the document.
    fn declaration_text(&self, counterpart: Option<&SourceSymbol<'_>>) -> (usize, &str) {
        let start = self.offset(self.true_start());
        let end = self.offset(self.body_start(counterpart)).max(start);
        (start, &self.document.text()[start..end])
    }

    /// Byte offsets of the name within [`Self::declaration_text`].
    fn name_span(&self, base: usize, length: usize) -> Result<(usize, usize), ParserError> {
        let inconsistent = || ParserError::InconsistentRange {
            symbol: self.name.clone(),
        };
        let start = self
            .offset(self.selection_range.start)
            .checked_sub(base)
            .ok_or_else(inconsistent)?;
        let end = self
            .offset(self.selection_range.end)
            .checked_sub(base)
            .ok_or_else(inconsistent)?;
        if start > end || end > length {
            return Err(inconsistent());
        }
        Ok((start, end))
    }

    /// A declaration for this definition, suitable for placing inside its
    /// class or header: `void Widget::resize(int w) { ... }` becomes
    /// `void resize(int w);`. Empty if this is not a function definition.
    #[must_use]
    pub fn new_function_declaration(&self) -> String {
        self.try_new_function_declaration().unwrap_or_else(|error| {
            tracing::debug!(symbol = %self.name, uri = %self.uri(), %error, "no declaration for definition");
            String::new()
        })
    }

    /// [`Self::new_function_declaration`], reporting why no declaration
    /// could be produced.
    pub fn try_new_function_declaration(&self) -> Result<String, ParserError> {
        if !self.is_function_definition() {
            return Err(ParserError::NotADefinition {
                symbol: self.name.clone(),
            });
        }
        let (base, declaration) = self.declaration_text(None);
        let declaration = declaration.trim_end();
        let (name_start, _) = self.name_span(base, declaration.len())?;
        let masked = mask::mask_angle_brackets(&mask::mask_comments_and_quotes(declaration));
        let qualifier_start = QUALIFIER_AT_END
            .find(&masked[..name_start])
            .map_or(name_start, |qualifier| qualifier.start());
        Ok(format!(
            "{}{};",
            &declaration[..qualifier_start],
            &declaration[name_start..]
        ))
    }

    /// Definition text (without a body) for this declaration, qualified by
    /// `scope`. See [`Self::format_declaration_for_new_definition`].
    pub fn definition_signature(&self, scope: &Scope) -> Result<String, ParserError> {
        if !self.is_function() {
            return Err(ParserError::NotAFunction {
                symbol: self.name.clone(),
            });
        }
        let (base, declaration) = self.declaration_text(None);
        let masked = mask::mask_comments_and_quotes(declaration);
        let mut keep = masked.trim_end().trim_end_matches(';').trim_end().len();
        if let Some(special) = SPECIAL_MEMBER_BODY.find(&masked[..keep]) {
            keep = special.start();
        }
        let declaration = &declaration[..keep];
        let masked = &masked[..keep];

        let (name_start, name_end) = self.name_span(base, keep)?;
        let missing = || ParserError::MissingParameterList {
            symbol: self.name.clone(),
        };
        let parens = mask::mask_parentheses(masked);
        let open = name_end + parens[name_end..].find('(').ok_or_else(missing)?;
        let close = open + parens[open..].find(')').ok_or_else(missing)?;

        let leading = self.clean_leading(&declaration[..name_start], &masked[..name_start]);
        let trailing = rebuild_trailing(&declaration[close + 1..], &masked[close + 1..]);
        let parameters = strip_default_values(&declaration[open + 1..close]);

        let head = format!("{leading}{}", scope.qualifier);
        let composed = format!(
            "{head}{}({parameters}){trailing}",
            &declaration[name_start..name_end]
        );

        let base_indent = self.indentation();
        let old_column = column_after_dedent(&declaration[..name_start], base_indent);
        let new_column = column_after_dedent(&head, base_indent);
        let name_line = head.matches('\n').count();
        let delta = isize::try_from(new_column).unwrap_or(isize::MAX) - isize::try_from(old_column).unwrap_or(0);

        let dedented = reindent_continuation_lines(&composed, base_indent, "");
        let shifted = shift_lines(&dedented, name_line + 1, delta);

        let eol = self.document.eol();
        let mut out: String = scope
            .template_preamble
            .iter()
            .map(|clause| format!("{clause}{eol}"))
            .collect();
        out.push_str(shifted.trim_end());
        Ok(out)
    }

    /// Leading text with definition-illegal specifiers dropped, template
    /// defaults removed, and (for scoped symbols) any written qualifier
    /// removed since the scope qualifier replaces it.
    fn clean_leading(&self, leading: &str, masked: &str) -> String {
        let angles = mask::mask_angle_brackets(masked);
        let mut splices: Vec<Splice> = LEADING_SPECIFIER
            .find_iter(&angles)
            .map(|found| Splice {
                start: found.start(),
                end: found.end(),
                replacement: String::new(),
            })
            .collect();

        if !self.scope_names().is_empty()
            && let Some(qualifier) = QUALIFIER_AT_END.find(&angles)
        {
            splices.push(Splice {
                start: qualifier.start(),
                end: qualifier.end(),
                replacement: String::new(),
            });
        }

        if let Some(keyword) = TEMPLATE_KEYWORD.find(masked) {
            let open = keyword.end() - 1;
            if let Some(close) = angles[open..].find('>').map(|index| open + index) {
                splices.push(Splice {
                    start: open + 1,
                    end: close,
                    replacement: strip_default_values(&leading[open + 1..close]),
                });
            }
        }
        apply_splices(leading, splices)
    }

    /// Turn this declaration into the signature of a new out-of-line
    /// definition placed at `position` in `target`.
    ///
    /// Drops the trailing `;`, `= 0`/`= default`/`= delete`, parameter
    /// defaults, `virtual`/`static`/`explicit`/`friend` and
    /// `override`/`final`, prefixes the scope qualifier needed at
    /// `position`, and realigns continuation lines under the moved name.
    pub async fn try_format_declaration_for_new_definition(
        &self,
        target: &SourceDocument,
        position: Position,
        workspace: &dyn Workspace,
    ) -> Result<String, ParserError> {
        let scope = self.scope_for(target, position, workspace).await;
        self.definition_signature(&scope)
    }

    /// Like [`Self::try_format_declaration_for_new_definition`] but returns
    /// an empty string when the declaration cannot be transformed.
    pub async fn format_declaration_for_new_definition(
        &self,
        target: &SourceDocument,
        position: Position,
        workspace: &dyn Workspace,
    ) -> String {
        match self
            .try_format_declaration_for_new_definition(target, position, workspace)
            .await
        {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(%error, symbol = %self.name, uri = %self.uri(), "cannot derive definition");
                String::new()
            }
        }
    }

    /// Text that replaces this declaration (from its true start to its
    /// statement end) with `definition`'s body attached.
    ///
    /// The body is re-indented to this declaration's level. If this
    /// declaration has no leading comment, the definition's comment comes
    /// along.
    #[must_use]
    pub fn combine_definition(&self, definition: &SourceSymbol<'_>) -> String {
        let (_, declaration) = self.declaration_text(None);
        let masked = mask::mask_comments_and_quotes(declaration);
        let keep = masked.trim_end().trim_end_matches(';').trim_end().len();
        let signature = &declaration[..keep];

        let eol = self.document.eol();
        let indent = self.indentation();
        let definition_indent = definition.indentation();

        let (_, definition_head) = definition.declaration_text(Some(self));
        let gap = &definition_head[definition_head.trim_end().len()..];
        let separator = if gap.contains('\n') {
            format!("{eol}{indent}")
        } else {
            " ".to_string()
        };

        let text = definition.document.text();
        let body_start = definition.offset(definition.body_start(Some(self)));
        let body_end = definition.offset(definition.range.end).max(body_start);
        let body = reindent_continuation_lines(&text[body_start..body_end], definition_indent, indent);

        let mut out = String::new();
        let own_comment = self.leading_comment_start() != self.true_start();
        let moved_comment = definition.leading_comment_start() != definition.true_start();
        if !own_comment && moved_comment {
            let from = definition.offset(definition.leading_comment_start());
            let to = definition.offset(definition.true_start());
            let comment = text[from..to].trim_end();
            out.push_str(&reindent_continuation_lines(comment, definition_indent, indent));
            out.push_str(eol);
            out.push_str(indent);
        }
        out.push_str(signature);
        out.push_str(&separator);
        out.push_str(&body);
        out
    }
}

/// Drop `override`/`final` from `trailing`, found on its masked copy.
fn rebuild_trailing(trailing: &str, masked: &str) -> String {
    let splices = TRAILING_SPECIFIER
        .find_iter(masked)
        .map(|found| Splice {
            start: found.start(),
            end: found.end(),
            replacement: String::new(),
        })
        .collect();
    apply_splices(trailing, splices)
}
