//! Helpers for C++ names as oracles report them.

/// Split `text` on `::` that is not nested inside `<>` or `()`.
#[must_use]
pub fn split_scope(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth = (depth - 1).max(0),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&text[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&text[start..]);
    segments
}

/// Remove a trailing parameter list, keeping the parentheses that belong to
/// `operator()`.
#[must_use]
pub fn strip_parameters(text: &str) -> &str {
    let search_from = text.find("operator").map_or(0, |index| {
        let after = index + "operator".len();
        let rest = text[after..].trim_start();
        let skipped = text.len() - rest.len();
        if rest.starts_with("()") { skipped + 2 } else { after }
    });
    text[search_from..]
        .find('(')
        .map_or(text, |index| text[..search_from + index].trim_end())
}

/// Reduce an oracle-reported name to the plain identifier shown to users.
///
/// `ns::Foo<T>::bar(int) const` becomes `bar`; `Foo::operator()(int)`
/// becomes `operator()`.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let without_parameters = strip_parameters(raw.trim());
    split_scope(without_parameters)
        .last()
        .map_or_else(String::new, |segment| segment.trim().to_string())
}

/// Remove every `<...>` group, e.g. `Foo<T, U>` becomes `Foo`.
#[must_use]
pub fn strip_template_args(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Whether `signature` names a constructor (`Foo::Foo`) or, with
/// `destructor`, a destructor (`Foo::~Foo`) by its qualifier alone.
#[must_use]
pub fn is_self_qualified(signature: &str, destructor: bool) -> bool {
    let segments = split_scope(strip_parameters(signature.trim()));
    let [.., previous, last] = segments.as_slice() else {
        return false;
    };
    let owner = previous.split_whitespace().last().map(strip_template_args);
    let last = strip_template_args(last);
    let Some(owner) = owner else {
        return false;
    };
    if owner.is_empty() {
        return false;
    }
    if destructor {
        last.strip_prefix('~').is_some_and(|name| name.trim() == owner)
    } else {
        last == owner
    }
}

/// Strip common private-member decorations: `m_`/`s_` prefixes and leading
/// or trailing underscores. Returns the input unchanged if nothing would
/// remain.
#[must_use]
pub fn base_name(name: &str) -> String {
    let mut stripped = name.trim_start_matches('_');
    for prefix in ["m_", "s_"] {
        if let Some(rest) = stripped.strip_prefix(prefix) {
            stripped = rest;
            break;
        }
    }
    let stripped = stripped.trim_end_matches('_');
    if stripped.is_empty() {
        name.to_string()
    } else {
        stripped.to_string()
    }
}

/// Whether an oracle-reported scope name stands for an anonymous
/// namespace, which never appears in a qualifier.
#[must_use]
pub fn is_anonymous(name: &str) -> bool {
    name.is_empty() || name.contains("anonymous")
}

/// Upper-case the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
