//! Getter and setter synthesis for member variables.

use hinge_config::{BraceStyle, GetterStyle};
use hinge_core::{Position, SourceDocument, Workspace};
use hinge_parser::{ResolveOptions, Scope, SourceSymbol, mask, names};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::RefactorError;

static STORAGE_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:static|mutable|constexpr|inline|thread_local|extern)\b\s*").expect("valid regex")
});
static CONST_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bconst\b\s*").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A member function synthesized for one member variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub name: String,
    pub return_type: String,
    /// The full parameter, e.g. `const std::string &name`; empty for getters.
    pub parameter: String,
    /// A single statement, e.g. `return m_width;`.
    pub body: String,
    /// Whether the function is a `const` member function.
    pub is_const: bool,
    pub is_static: bool,
}

impl Accessor {
    /// A getter returning `member` by value.
    #[must_use]
    pub fn getter(member: &SourceSymbol<'_>, style: GetterStyle) -> Self {
        let is_static = member.is_static();
        Self {
            kind: AccessorKind::Getter,
            name: getter_name(&member.name, style),
            return_type: member_type(member),
            parameter: String::new(),
            body: format!("return {};", member.name),
            is_const: !is_static,
            is_static,
        }
    }

    /// A setter assigning its parameter to `member`.
    ///
    /// Primitive and pointer members are passed by value, everything else by
    /// `const` reference. Resolving whether a named type is primitive may
    /// consult the oracle.
    pub async fn setter(
        member: &SourceSymbol<'_>,
        workspace: &dyn Workspace,
        options: &ResolveOptions,
    ) -> Result<Self, RefactorError> {
        if member.is_const() || member.is_constexpr() {
            return Err(RefactorError::ConstMember {
                symbol: member.name.clone(),
            });
        }

        let member_type = member_type(member);
        let by_value = member.is_pointer() || member.is_primitive(workspace, options).await;
        let base = names::base_name(&member.name);
        let parameter_type = if by_value {
            member_type
        } else {
            format!("const {member_type} &")
        };

        let is_static = member.is_static();
        let target = if base != member.name {
            member.name.clone()
        } else if is_static {
            let class = member.parent().map(|class| names::strip_template_args(&class.name));
            class.map_or_else(|| member.name.clone(), |class| format!("{class}::{}", member.name))
        } else {
            format!("this->{}", member.name)
        };
        tracing::debug!(symbol = %member.name, by_value, "synthesizing setter");

        Ok(Self {
            kind: AccessorKind::Setter,
            name: format!("set{}", names::capitalize(&base)),
            return_type: "void".to_string(),
            parameter: join_type(&parameter_type, &base),
            body: format!("{target} = {base};"),
            is_const: false,
            is_static,
        })
    }

    fn signature(&self, qualifier: &str) -> String {
        let name = format!("{qualifier}{}", self.name);
        let suffix = if self.is_const { " const" } else { "" };
        format!("{}({}){suffix}", join_type(&self.return_type, &name), self.parameter)
    }

    fn storage(&self) -> &'static str {
        if self.is_static { "static " } else { "" }
    }

    /// `int width() const;`
    #[must_use]
    pub fn declaration(&self) -> String {
        format!("{}{};", self.storage(), self.signature(""))
    }

    /// `int width() const { return m_width; }`, for use inside the class.
    #[must_use]
    pub fn inline_definition(&self) -> String {
        format!("{}{} {{ {} }}", self.storage(), self.signature(""), self.body)
    }

    /// An out-of-line definition qualified by `scope`, with the body on its
    /// own line indented by `indent_unit`.
    #[must_use]
    pub fn definition(&self, scope: &Scope, brace_style: BraceStyle, indent_unit: &str, eol: &str) -> String {
        let mut out: String = scope
            .template_preamble
            .iter()
            .map(|clause| format!("{clause}{eol}"))
            .collect();
        out.push_str(&self.signature(&scope.qualifier));
        match brace_style {
            BraceStyle::SameLine => out.push_str(" {"),
            BraceStyle::NewLine => {
                out.push_str(eol);
                out.push('{');
            }
        }
        out.push_str(&format!("{eol}{indent_unit}{}{eol}}}", self.body));
        out
    }

    /// [`Self::definition`] for placement at `position` in `target`, with
    /// the qualifier `member` needs there.
    pub async fn format_definition(
        &self,
        member: &SourceSymbol<'_>,
        target: &SourceDocument,
        position: Position,
        workspace: &dyn Workspace,
        brace_style: BraceStyle,
        indent_unit: &str,
    ) -> String {
        let scope = member.scope_for(target, position, workspace).await;
        self.definition(&scope, brace_style, indent_unit, target.eol())
    }
}

/// `m_width` becomes `width`; a member without decorations (`width`) gets a
/// `getWidth` getter so the two names do not collide.
fn getter_name(member_name: &str, style: GetterStyle) -> String {
    let base = names::base_name(member_name);
    match style {
        GetterStyle::BaseName if base != member_name => base,
        _ => format!("get{}", names::capitalize(&base)),
    }
}

/// The declared type of `member` without storage specifiers and without
/// its own top-level `const`. Template arguments are kept as written.
fn member_type(member: &SourceSymbol<'_>) -> String {
    let document = member.document();
    let start = document.offset_at(member.true_start());
    let end = document.offset_at(member.selection_range.start).max(start);
    let leading = &document.text()[start..end];
    let masked = mask::mask_angle_brackets(&mask::mask_comments_and_quotes(leading));

    let mut removed: Vec<(usize, usize)> = STORAGE_SPECIFIER
        .find_iter(&masked)
        .map(|found| (found.start(), found.end()))
        .collect();
    let own_qualifiers = masked.rfind('*').map_or(0, |star| star + 1);
    removed.extend(
        CONST_QUALIFIER
            .find_iter(&masked[own_qualifiers..])
            .map(|found| (own_qualifiers + found.start(), own_qualifiers + found.end())),
    );
    removed.sort_unstable();

    let mut kept = String::with_capacity(leading.len());
    let mut cursor = 0;
    for (from, to) in removed {
        if from >= cursor {
            kept.push_str(&leading[cursor..from]);
            kept.push(' ');
            cursor = to;
        }
    }
    kept.push_str(&leading[cursor..]);
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `int` + `width` is `int width`, but `Widget *` + `child` is `Widget *child`.
fn join_type(type_text: &str, name: &str) -> String {
    if type_text.ends_with(['*', '&']) {
        format!("{type_text}{name}")
    } else {
        format!("{type_text} {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hinge_core::memory::MemoryWorkspace;
    use hinge_core::{Range, RawSymbol, SymbolKind};
    use hinge_parser::SymbolTree;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const WIDGET: &str = "\
class Widget {
    int m_width;
    static const int s_count = 0;
    mutable std::map<const Key, int> m_cache;
    const char *const m_label;
    Widget *parent_;
    std::string title;
    const int id_;
};
";

    const FIELDS: [&str; 7] = ["m_width", "s_count", "m_cache", "m_label", "parent_", "title", "id_"];

    fn widget() -> (SourceDocument, SymbolTree) {
        let document = SourceDocument::new("file:///widget.h", WIDGET);
        let span = |name: &str, kind: SymbolKind, from: usize, to: usize| {
            let at = WIDGET.find(name).unwrap_or_else(|| panic!("{name} missing"));
            RawSymbol::new(
                name,
                kind,
                Range::new(document.position_at(from), document.position_at(to)),
                Range::new(document.position_at(at), document.position_at(at + name.len())),
            )
        };
        let fields = WIDGET
            .lines()
            .skip(1)
            .zip(FIELDS)
            .map(|(line, name)| {
                let start = WIDGET.find(line.trim()).unwrap_or_default();
                let end = WIDGET.find(name).unwrap_or_default() + name.len();
                span(name, SymbolKind::Field, start, end)
            })
            .collect();
        let class = span("Widget", SymbolKind::Class, 0, WIDGET.find("};").unwrap_or_default() + 1).with_children(fields);
        let tree = SymbolTree::build(&[class]);
        (document, tree)
    }

    fn field<'t>(tree: &'t SymbolTree, document: &'t SourceDocument, name: &str) -> SourceSymbol<'t> {
        let class = tree.roots().next().expect("class");
        let member = class.children().find(|child| child.name == name).expect("field");
        SourceSymbol::new(member, document)
    }

    #[rstest]
    #[case("m_width", "int width() const;")]
    #[case("s_count", "static int count();")]
    #[case("m_cache", "std::map<const Key, int> cache() const;")]
    #[case("m_label", "const char *label() const;")]
    #[case("parent_", "Widget *parent() const;")]
    #[case("title", "std::string getTitle() const;")]
    fn getter_declarations(#[case] name: &str, #[case] expected: &str) {
        let (document, tree) = widget();
        let getter = Accessor::getter(&field(&tree, &document, name), GetterStyle::BaseName);
        assert_eq!(getter.declaration(), expected);
    }

    #[rstest]
    #[case("m_width", GetterStyle::BaseName, "width")]
    #[case("m_width", GetterStyle::GetPrefix, "getWidth")]
    #[case("width", GetterStyle::BaseName, "getWidth")]
    #[case("_count_", GetterStyle::GetPrefix, "getCount")]
    fn getter_names(#[case] member: &str, #[case] style: GetterStyle, #[case] expected: &str) {
        assert_eq!(getter_name(member, style), expected);
    }

    #[test]
    fn getter_inline_and_out_of_line() {
        let (document, tree) = widget();
        let getter = Accessor::getter(&field(&tree, &document, "m_width"), GetterStyle::BaseName);
        assert_eq!(getter.inline_definition(), "int width() const { return m_width; }");

        let scope = Scope {
            qualifier: "app::Widget::".to_string(),
            template_preamble: Vec::new(),
        };
        assert_eq!(
            getter.definition(&scope, BraceStyle::NewLine, "    ", "\n"),
            "int app::Widget::width() const\n{\n    return m_width;\n}"
        );
        assert_eq!(
            getter.definition(&scope, BraceStyle::SameLine, "\t", "\n"),
            "int app::Widget::width() const {\n\treturn m_width;\n}"
        );
    }

    #[test]
    fn template_scopes_add_a_preamble() {
        let (document, tree) = widget();
        let getter = Accessor::getter(&field(&tree, &document, "parent_"), GetterStyle::BaseName);
        let scope = Scope {
            qualifier: "Box<T>::".to_string(),
            template_preamble: vec!["template <typename T>".to_string()],
        };
        assert_eq!(
            getter.definition(&scope, BraceStyle::SameLine, "  ", "\n"),
            "template <typename T>\nWidget *Box<T>::parent() const {\n  return parent_;\n}"
        );
    }

    #[rstest]
    #[case("m_width", "void setWidth(int width);", "m_width = width;")]
    #[case("parent_", "void setParent(Widget *parent);", "parent_ = parent;")]
    #[case("title", "void setTitle(const std::string &title);", "this->title = title;")]
    #[case("m_cache", "void setCache(const std::map<const Key, int> &cache);", "m_cache = cache;")]
    #[tokio::test]
    async fn setter_parameters(#[case] name: &str, #[case] declaration: &str, #[case] body: &str) {
        let (document, tree) = widget();
        let options = ResolveOptions {
            cross_file: false,
            max_depth: 8,
        };
        let setter = Accessor::setter(&field(&tree, &document, name), &MemoryWorkspace::new(), &options)
            .await
            .expect("setter");
        assert_eq!(setter.declaration(), declaration);
        assert_eq!(setter.body, body);
    }

    #[tokio::test]
    async fn const_members_have_no_setter() {
        let (document, tree) = widget();
        let options = ResolveOptions::default();
        for name in ["id_", "m_label", "s_count"] {
            let result = Accessor::setter(&field(&tree, &document, name), &MemoryWorkspace::new(), &options).await;
            assert!(matches!(result, Err(RefactorError::ConstMember { .. })), "{name}");
        }
    }

    #[tokio::test]
    async fn definitions_are_qualified_for_their_target() {
        let (document, tree) = widget();
        let mut workspace = MemoryWorkspace::new();
        let target = workspace.add_document("file:///widget.cpp", "#include \"widget.h\"\n");
        let getter = Accessor::getter(&field(&tree, &document, "m_width"), GetterStyle::GetPrefix);
        let text = getter
            .format_definition(
                &field(&tree, &document, "m_width"),
                &target,
                Position::new(1, 0),
                &workspace,
                BraceStyle::NewLine,
                "    ",
            )
            .await;
        assert_eq!(text, "int Widget::getWidth() const\n{\n    return m_width;\n}");
    }
}
