//! Equal-length masking of C++ source text.
//!
//! Every function here returns a string with exactly the same byte length
//! as its input, with the masked spans overwritten by ASCII spaces. Offsets
//! found by scanning a masked string are therefore valid in the original.
//!
//! The group maskers ([`mask_parentheses`], [`mask_braces`], ...) blank the
//! *contents* of each outermost group and keep the delimiters, so a scan can
//! still see where a group starts and ends. They do not look at comments or
//! literals themselves; run [`mask_comments_and_quotes`] first.
//!
//! [`mask_angle_brackets`] is a heuristic. `<` is ambiguous between a
//! template argument list and a comparison or shift, and telling them apart
//! needs a full parser. A `<` is treated as opening a template argument list
//! unless it is part of `<<`/`<=`, follows `operator`, or has whitespace on
//! both sides; the group is abandoned if `;`, `{`, `}`, `&&`, `||`, or an
//! unbalanced `)`/`]` appears before the matching `>`. Known misreads:
//! `a<b > c` is taken as a template argument list, and a template argument
//! written as `Foo< T >` is left unmasked.

const BLANK: u8 = b' ';

/// Which lexical classes [`mask_non_code`] should blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskOptions {
    pub comments: bool,
    pub quotes: bool,
    /// Keep `//`, `/*` and `*/` visible and blank only the comment text.
    pub keep_comment_delimiters: bool,
}

/// Blank comments and/or literal contents in a single lexical pass.
///
/// One pass is required so that `"//"` inside a string never opens a
/// comment and an apostrophe inside a comment never opens a literal.
/// Literal delimiters are kept; only their contents are blanked.
#[must_use]
pub fn mask_non_code(text: &str, options: MaskOptions) -> String {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut i = 0;
    while i < src.len() {
        match src[i] {
            b'/' if src.get(i + 1) == Some(&b'/') => {
                let end = line_comment_end(src, i);
                if options.comments {
                    let from = if options.keep_comment_delimiters { i + 2 } else { i };
                    blank(&mut out, from, end);
                }
                i = end;
            }
            b'/' if src.get(i + 1) == Some(&b'*') => {
                let close = find(src, i + 2, b"*/");
                let end = close.map_or(src.len(), |c| c + 2);
                if options.comments {
                    if options.keep_comment_delimiters {
                        blank(&mut out, i + 2, close.unwrap_or(src.len()));
                    } else {
                        blank(&mut out, i, end);
                    }
                }
                i = end;
            }
            b'"' if is_raw_string_prefix(src, i) => {
                let (content_end, end) = raw_string_end(src, i);
                if options.quotes {
                    blank(&mut out, i + 1, content_end);
                }
                i = end;
            }
            quote @ (b'"' | b'\'') => {
                if quote == b'\'' && is_digit_separator(src, i) {
                    i += 1;
                    continue;
                }
                let end = literal_end(src, i, quote);
                if options.quotes {
                    let content_end = if end > i + 1 && src[end - 1] == quote { end - 1 } else { end };
                    blank(&mut out, i + 1, content_end);
                }
                i = end;
            }
            _ => i += 1,
        }
    }
    into_string(out, text)
}

/// Blank every comment, delimiters included.
#[must_use]
pub fn mask_comments(text: &str) -> String {
    mask_non_code(
        text,
        MaskOptions {
            comments: true,
            ..MaskOptions::default()
        },
    )
}

/// Blank comment text but keep `//`, `/*` and `*/` visible, so comment
/// boundaries can still be located.
#[must_use]
pub fn mask_comments_keep_delimiters(text: &str) -> String {
    mask_non_code(
        text,
        MaskOptions {
            comments: true,
            quotes: true,
            keep_comment_delimiters: true,
        },
    )
}

/// Blank the contents of string and character literals.
#[must_use]
pub fn mask_quotes(text: &str) -> String {
    mask_non_code(
        text,
        MaskOptions {
            quotes: true,
            ..MaskOptions::default()
        },
    )
}

#[must_use]
pub fn mask_comments_and_quotes(text: &str) -> String {
    mask_non_code(
        text,
        MaskOptions {
            comments: true,
            quotes: true,
            keep_comment_delimiters: false,
        },
    )
}

/// Blank the contents of every outermost `( ... )` group.
#[must_use]
pub fn mask_parentheses(text: &str) -> String {
    mask_balanced(text, b'(', b')')
}

/// Blank the contents of every outermost `[ ... ]` group.
#[must_use]
pub fn mask_brackets(text: &str) -> String {
    mask_balanced(text, b'[', b']')
}

/// Blank the contents of every outermost `{ ... }` group.
#[must_use]
pub fn mask_braces(text: &str) -> String {
    mask_balanced(text, b'{', b'}')
}

fn mask_balanced(text: &str, open: u8, close: u8) -> String {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut depth = 0usize;
    let mut content_start = 0;
    for (i, &byte) in src.iter().enumerate() {
        if byte == open {
            if depth == 0 {
                content_start = i + 1;
            }
            depth += 1;
        } else if byte == close && depth > 0 {
            depth -= 1;
            if depth == 0 {
                blank(&mut out, content_start, i);
            }
        }
    }
    into_string(out, text)
}

/// Blank the contents of every outermost template argument list.
///
/// See the module documentation for the heuristic and its limits.
#[must_use]
pub fn mask_angle_brackets(text: &str) -> String {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'<'
            && !is_comparison_angle(src, i)
            && let Some(close) = matching_angle(src, i)
        {
            blank(&mut out, i + 1, close);
            i = close + 1;
            continue;
        }
        i += 1;
    }
    into_string(out, text)
}

/// Blank comparison-like operators (`==`, `!=`, `<=`, `>=`, `<=>`, `<<`,
/// spaced `>>`, `->`) and any `<`/`>` with whitespace on both sides, so that
/// only template brackets and assignment `=` remain for later scans.
#[must_use]
pub fn mask_comparison_operators(text: &str) -> String {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut i = 0;
    while i < src.len() {
        let next = src.get(i + 1).copied();
        let width = match (src[i], next) {
            (b'<', Some(b'=')) if src.get(i + 2) == Some(&b'>') => 3,
            (b'<' | b'>' | b'=' | b'!', Some(b'=')) => 2,
            (b'<', Some(b'<')) | (b'-', Some(b'>')) => 2,
            (b'>', Some(b'>')) if spaced(src, i, 2) => 2,
            (b'<' | b'>', _) if spaced(src, i, 1) => 1,
            _ => 0,
        };
        if width == 0 {
            i += 1;
        } else {
            blank(&mut out, i, i + width);
            i += width;
        }
    }
    into_string(out, text)
}

/// Mask everything that can hide a top-level comma or `=` inside a
/// parameter list: comments, literals, comparisons, and nested groups.
#[must_use]
pub fn mask_for_parameter_scan(text: &str) -> String {
    let masked = mask_comments_and_quotes(text);
    let masked = mask_comparison_operators(&masked);
    let masked = mask_parentheses(&masked);
    let masked = mask_brackets(&masked);
    let masked = mask_braces(&masked);
    mask_angle_brackets(&masked)
}

fn blank(out: &mut [u8], from: usize, to: usize) {
    let to = to.min(out.len());
    if from < to {
        out[from..to].fill(BLANK);
    }
}

fn into_string(out: Vec<u8>, original: &str) -> String {
    // Masked spans always start and end on ASCII delimiters, so whole
    // characters are replaced and the result stays valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|_| original.to_string())
}

fn find(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    src.get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|index| from + index)
}

fn line_comment_end(src: &[u8], from: usize) -> usize {
    src[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(src.len(), |index| from + index)
}

/// Index just past the closing quote, or the end of the line for an
/// unterminated literal.
fn literal_end(src: &[u8], open: usize, quote: u8) -> usize {
    let mut j = open + 1;
    while j < src.len() {
        match src[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            byte if byte == quote => return j + 1,
            _ => j += 1,
        }
    }
    src.len()
}

/// `R"delim( ... )delim"`, optionally prefixed by `u8`, `u`, `U` or `L`.
fn is_raw_string_prefix(src: &[u8], quote: usize) -> bool {
    if quote == 0 || src[quote - 1] != b'R' {
        return false;
    }
    let mut start = quote - 1;
    while start > 0 && matches!(src[start - 1], b'u' | b'U' | b'L' | b'8') {
        start -= 1;
    }
    start == 0 || !is_identifier_byte(src[start - 1])
}

/// Returns `(content_end, end)` for a raw string starting at `quote`.
fn raw_string_end(src: &[u8], quote: usize) -> (usize, usize) {
    let Some(paren) = src[quote + 1..].iter().position(|&b| b == b'(').map(|i| quote + 1 + i) else {
        return (src.len(), src.len());
    };
    let mut terminator = Vec::with_capacity(paren - quote + 1);
    terminator.push(b')');
    terminator.extend_from_slice(&src[quote + 1..paren]);
    terminator.push(b'"');
    find(src, paren + 1, &terminator).map_or((src.len(), src.len()), |close| {
        let end = close + terminator.len();
        (end - 1, end)
    })
}

/// `1'000'000` and `0xFF'FF` use `'` as a digit separator.
fn is_digit_separator(src: &[u8], quote: usize) -> bool {
    if quote == 0 || !src.get(quote + 1).is_some_and(u8::is_ascii_alphanumeric) {
        return false;
    }
    let mut start = quote;
    while start > 0 && (src[start - 1].is_ascii_alphanumeric() || matches!(src[start - 1], b'\'' | b'.')) {
        start -= 1;
    }
    start < quote && src[start].is_ascii_digit()
}

const fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn spaced(src: &[u8], at: usize, width: usize) -> bool {
    let before = at.checked_sub(1).map(|i| src[i]);
    let after = src.get(at + width).copied();
    before.is_some_and(|b| b.is_ascii_whitespace()) && after.is_some_and(|b| b.is_ascii_whitespace())
}

fn is_comparison_angle(src: &[u8], at: usize) -> bool {
    if matches!(src.get(at + 1), Some(b'<' | b'=')) || (at > 0 && src[at - 1] == b'<') {
        return true;
    }
    if spaced(src, at, 1) {
        return true;
    }
    follows_operator_keyword(src, at)
}

/// Whether `operator` (as a whole word) ends just before `at`, ignoring
/// whitespace in between. Only looks back as far as the keyword.
fn follows_operator_keyword(src: &[u8], at: usize) -> bool {
    const KEYWORD: &[u8] = b"operator";
    let mut end = at;
    while end > 0 && src[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    let Some(start) = end.checked_sub(KEYWORD.len()) else {
        return false;
    };
    &src[start..end] == KEYWORD && !(start > 0 && is_identifier_byte(src[start - 1]))
}

fn matching_angle(src: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut nesting = 0i32;
    for j in open..src.len() {
        match src[j] {
            b'(' | b'[' => nesting += 1,
            b')' | b']' => {
                nesting -= 1;
                if nesting < 0 {
                    return None;
                }
            }
            b';' | b'{' | b'}' => return None,
            b'&' if nesting == 0 && src.get(j + 1) == Some(&b'&') => return None,
            b'|' if nesting == 0 && src.get(j + 1) == Some(&b'|') => return None,
            b'<' if nesting == 0 => depth += 1,
            b'>' if nesting == 0 && !(j > 0 && src[j - 1] == b'-') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}
