//! Line-wise indentation rewriting.
//!
//! Lines are split on `\n` only, so a `\r` stays attached to its line and
//! CRLF text round-trips unchanged.

/// The run of spaces and tabs that starts `line`.
#[must_use]
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Move every line after the first from indentation `from` to `to`.
///
/// Lines that do not start with `from` lose whatever leading whitespace
/// they have, up to the length of `from`. Blank lines become empty.
#[must_use]
pub fn reindent_continuation_lines(text: &str, from: &str, to: &str) -> String {
    map_lines(text, 1, |line| {
        if is_blank(line) {
            return carriage_return_of(line).to_string();
        }
        let rest = line.strip_prefix(from).unwrap_or_else(|| {
            let present = leading_whitespace(line);
            &line[present.len().min(from.len())..]
        });
        format!("{to}{rest}")
    })
}

/// Prefix every non-blank line, the first included, with `indent`.
#[must_use]
pub fn indent_lines(text: &str, indent: &str) -> String {
    map_lines(text, 0, |line| {
        if is_blank(line) {
            carriage_return_of(line).to_string()
        } else {
            format!("{indent}{line}")
        }
    })
}

/// Widen (positive `delta`) or narrow the indentation of lines from index
/// `first` onwards by `delta` columns. Narrowing never removes more than the
/// existing leading whitespace.
#[must_use]
pub fn shift_lines(text: &str, first: usize, delta: isize) -> String {
    if delta == 0 {
        return text.to_string();
    }
    map_lines(text, first, |line| {
        if is_blank(line) {
            return line.to_string();
        }
        if delta > 0 {
            format!("{}{line}", " ".repeat(delta.unsigned_abs()))
        } else {
            let present = leading_whitespace(line).len();
            line[present.min(delta.unsigned_abs())..].to_string()
        }
    })
}

fn map_lines(text: &str, first: usize, mut rewrite: impl FnMut(&str) -> String) -> String {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            if index < first {
                line.to_string()
            } else {
                rewrite(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn carriage_return_of(line: &str) -> &str {
    if line.ends_with('\r') { "\r" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn continuation_lines_move_between_indent_levels() {
        let text = "void f()\n    {\n        return;\n\n    }";
        assert_eq!(
            reindent_continuation_lines(text, "    ", ""),
            "void f()\n{\n    return;\n\n}"
        );
    }

    #[test]
    fn crlf_is_preserved() {
        let text = "a\r\n  b\r\n";
        assert_eq!(reindent_continuation_lines(text, "  ", "\t"), "a\r\n\tb\r\n");
        assert_eq!(indent_lines("x\r\n\r\ny", "  "), "  x\r\n\r\n  y");
    }

    #[test]
    fn shifting_clamps_at_existing_whitespace() {
        let text = "int f(int a,\n      int b)";
        assert_eq!(shift_lines(text, 1, 5), "int f(int a,\n           int b)");
        assert_eq!(shift_lines(text, 1, -10), "int f(int a,\nint b)");
    }
}
