use super::scope_tests::{GRID, grid_symbols};
use super::*;
use crate::error::ParserError;
use pretty_assertions::assert_eq;
use rstest::rstest;

const WIDGET: &str = "\
namespace app {
class Widget : public Base {
public:
    virtual int resize(int w = 1, int h = 2) const override;
    static Widget *create(const char *name = \"w, h\");
    explicit Widget(int w);
    virtual void draw() = 0;
    void configure(int width,
                   int height = 10);
};
}
";

fn widget() -> (SourceDocument, SymbolTree) {
    let document = SourceDocument::new("file:///widget.h", WIDGET);
    let class = raw(&document, "Widget", SymbolKind::Class, "class Widget", "};").with_children(vec![
        raw(&document, "resize", SymbolKind::Method, "virtual int resize", ";"),
        raw(&document, "create", SymbolKind::Method, "static Widget", ";"),
        raw(&document, "Widget", SymbolKind::Constructor, "explicit Widget", ";"),
        raw(&document, "draw", SymbolKind::Method, "virtual void draw", ";"),
        raw(&document, "configure", SymbolKind::Method, "void configure", ";"),
    ]);
    let namespace = raw(&document, "app", SymbolKind::Namespace, "namespace app", "};\n}").with_children(vec![class]);
    let tree = SymbolTree::build(&[namespace]);
    (document, tree)
}

#[rstest]
#[case("int a = 1, std::vector<int> b = {1,2}, int c", "int a, std::vector<int> b, int c")]
#[case("int a = f(1, 2), char c = ','", "int a, char c")]
#[case("bool b = x >= 2, int d", "bool b, int d")]
#[case("std::function<void(int)> cb = nullptr", "std::function<void(int)> cb")]
#[case("int a = 1 /* one, two */, int b", "int a, int b")]
#[case("int a = 1,\n         int b = 2", "int a,\n         int b")]
#[case("", "")]
fn default_values_are_stripped(#[case] parameters: &str, #[case] expected: &str) {
    assert_eq!(strip_default_values(parameters), expected);
}

#[rstest]
#[case("resize", &[], "int app::Widget::resize(int w, int h) const")]
#[case("resize", &["app"], "int Widget::resize(int w, int h) const")]
#[case("create", &["app"], "Widget *Widget::create(const char *name)")]
#[case("Widget", &["app"], "Widget::Widget(int w)")]
#[case("draw", &["app"], "void Widget::draw()")]
fn definition_signatures(#[case] name: &str, #[case] enclosing: &[&str], #[case] expected: &str) {
    let (document, tree) = widget();
    let symbol = nth(&tree, &document, name, usize::from(name == "Widget"));
    let enclosing: Vec<String> = enclosing.iter().map(ToString::to_string).collect();
    let scope = symbol.scope_relative_to(&enclosing);
    assert_eq!(symbol.definition_signature(&scope).expect("signature"), expected);
}

#[test]
fn continuation_lines_follow_the_qualified_name() {
    let (document, tree) = widget();
    let configure = find(&tree, &document, "configure");
    let scope = configure.scope_relative_to(&["app".to_string()]);
    assert_eq!(
        configure.definition_signature(&scope).expect("signature"),
        "void Widget::configure(int width,\n                       int height)"
    );
}

#[test]
fn class_template_members_get_a_preamble() {
    let document = SourceDocument::new("file:///grid.h", GRID);
    let tree = SymbolTree::build(&grid_symbols(&document));

    let fill = find(&tree, &document, "fill");
    assert_eq!(
        fill.definition_signature(&fill.scope_relative_to(&[])).expect("signature"),
        "template <typename T, int N>\nvoid outer::inner::Grid<T, N>::fill(T value)"
    );

    let convert = find(&tree, &document, "convert");
    assert_eq!(
        convert.definition_signature(&convert.scope_relative_to(&[])).expect("signature"),
        "template <typename T, int N>\ntemplate <typename U>\nU outer::inner::Grid<T, N>::convert() const"
    );
}

#[test]
fn missing_parameter_list_fails_soft() {
    let document = SourceDocument::new("file:///odd.h", "int broken;\n");
    let tree = SymbolTree::build(&[raw(&document, "broken", SymbolKind::Function, "int broken", ";")]);
    let broken = find(&tree, &document, "broken");
    assert_eq!(
        broken.definition_signature(&Scope::default()),
        Err(ParserError::MissingParameterList {
            symbol: "broken".to_string()
        })
    );

    let variable = SourceDocument::new("file:///var.h", "int count;\n");
    let tree = SymbolTree::build(&[raw(&variable, "count", SymbolKind::Variable, "int count", ";")]);
    assert!(matches!(
        find(&tree, &variable, "count").definition_signature(&Scope::default()),
        Err(ParserError::NotAFunction { .. })
    ));
}

#[test]
fn declaration_definition_round_trip() {
    let header = SourceDocument::new("file:///foo.h", "void foo(int x = 5);\n");
    let tree = SymbolTree::build(&[raw(&header, "foo", SymbolKind::Function, "void foo", ";")]);
    let signature = find(&tree, &header, "foo")
        .definition_signature(&Scope::default())
        .expect("signature");
    assert_eq!(signature, "void foo(int x)");

    let source = SourceDocument::new("file:///foo.cpp", format!("{signature}\n{{\n}}\n"));
    let tree = SymbolTree::build(&[raw(&source, "foo", SymbolKind::Function, "void foo", "}")]);
    assert_eq!(find(&tree, &source, "foo").new_function_declaration(), "void foo(int x);");
}

#[rstest]
#[case("int Widget::area() const\n{\n    return w * h;\n}\n", "Widget::area", "int Widget", "int area() const;")]
#[case("Widget::Widget(int w)\n    : w_(w)\n{\n}\n", "Widget::Widget", "Widget::Widget", "Widget(int w);")]
#[case("template <typename T>\nT ns::Box<T>::get() { return v; }\n", "ns::Box<T>::get", "T ns", "template <typename T>\nT get();")]
fn new_declarations_drop_the_qualifier(
    #[case] text: &str,
    #[case] name: &str,
    #[case] from: &str,
    #[case] expected: &str,
) {
    let document = SourceDocument::new("file:///w.cpp", text);
    let tree = SymbolTree::build(&[raw(&document, name, SymbolKind::Method, from, "}")]);
    let short = name.rsplit("::").next().unwrap_or(name);
    assert_eq!(find(&tree, &document, short).new_function_declaration(), expected);
}

#[test]
fn declarations_have_no_new_declaration() {
    let (document, tree) = widget();
    let draw = find(&tree, &document, "draw");
    assert_eq!(draw.new_function_declaration(), "");
    assert_eq!(
        draw.try_new_function_declaration(),
        Err(ParserError::NotADefinition {
            symbol: "draw".to_string()
        })
    );
}

#[test]
fn combining_moves_body_and_comment_to_the_declaration() {
    let header = SourceDocument::new("file:///w.h", "class Widget {\npublic:\n    int area() const;\n};\n");
    let header_tree = SymbolTree::build(&[raw(&header, "Widget", SymbolKind::Class, "class Widget", "};")
        .with_children(vec![raw(&header, "area", SymbolKind::Method, "int area", "const")])]);
    let declaration = find(&header_tree, &header, "area");

    let source = SourceDocument::new(
        "file:///w.cpp",
        "// Computes the area.\nint Widget::area() const\n{\n    return w * h;\n}\n",
    );
    let source_tree = SymbolTree::build(&[raw(&source, "Widget::area", SymbolKind::Method, "int Widget", "}")]);
    let definition = find(&source_tree, &source, "area");

    assert_eq!(
        declaration.combine_definition(&definition),
        "// Computes the area.\n    int area() const\n    {\n        return w * h;\n    }"
    );
}

#[test]
fn combining_keeps_same_line_braces() {
    let header = SourceDocument::new("file:///s.h", "/// Doc.\nint size();\n");
    let header_tree = SymbolTree::build(&[raw(&header, "size", SymbolKind::Function, "int size", ";")]);
    let declaration = find(&header_tree, &header, "size");

    let source = SourceDocument::new("file:///s.cpp", "// Other doc.\nint size() { return 1; }\n");
    let source_tree = SymbolTree::build(&[raw(&source, "size", SymbolKind::Function, "int size", "}")]);
    let definition = find(&source_tree, &source, "size");

    assert_eq!(declaration.combine_definition(&definition), "int size() { return 1; }");
}
