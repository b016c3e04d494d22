use super::*;
use rstest::rstest;

const WIDGET: &str = "\
class Widget {
public:
    void resize(int w);
    int area() const { return w_ * h_; }
    virtual void draw() = 0;
    static constexpr int kMax = 4;
    inline static Widget *instance_;
    const char *label_;
    char *const buffer_;
    const std::map<int, const char*> names_;
    typedef unsigned long Size;
    using Handle = int;
    class Nested {};
private:
    int w_;
    int h_;
};
";

fn widget() -> (SourceDocument, Vec<RawSymbol>) {
    let document = SourceDocument::new("file:///widget.h", WIDGET);
    let members = vec![
        raw(&document, "resize", SymbolKind::Method, "void resize", ";"),
        raw(&document, "area", SymbolKind::Method, "int area", "}"),
        raw(&document, "draw", SymbolKind::Method, "virtual void draw", "= 0"),
        raw(&document, "kMax", SymbolKind::Field, "static constexpr", "= 4"),
        raw(&document, "instance_", SymbolKind::Field, "inline static", "instance_"),
        raw(&document, "label_", SymbolKind::Field, "const char *label_", "label_"),
        raw(&document, "buffer_", SymbolKind::Field, "char *const", "buffer_"),
        raw(&document, "names_", SymbolKind::Field, "const std::map", "names_"),
        raw(&document, "Size", SymbolKind::Class, "typedef unsigned", "Size"),
        raw(&document, "Handle", SymbolKind::Class, "using Handle", "int"),
        raw(&document, "Nested", SymbolKind::Class, "class Nested", "{}"),
        raw(&document, "w_", SymbolKind::Field, "int w_", "w_"),
        raw(&document, "h_", SymbolKind::Field, "int h_", "h_"),
    ];
    let class = raw(&document, "Widget", SymbolKind::Class, "class Widget", "int h_;\n};").with_children(members);
    (document, vec![class])
}

#[test]
fn declarations_and_definitions_are_told_apart() {
    let (document, raw) = widget();
    let tree = SymbolTree::build(&raw);
    assert!(find(&tree, &document, "resize").is_function_declaration());
    assert!(find(&tree, &document, "draw").is_function_declaration());
    assert!(find(&tree, &document, "area").is_function_definition());
    assert!(!find(&tree, &document, "w_").is_function_declaration());
}

#[test]
fn oracle_detail_can_mark_a_declaration() {
    let document = SourceDocument::new("file:///x.h", "void f() {}\n");
    let symbol = raw(&document, "f", SymbolKind::Function, "void f", "}").with_detail("declaration");
    let tree = SymbolTree::build(&[symbol]);
    assert!(find(&tree, &document, "f").is_function_declaration());
}

#[rstest]
#[case("kMax", true, false, true, false, false)]
#[case("instance_", false, true, true, true, false)]
#[case("label_", false, false, false, true, false)]
#[case("buffer_", false, false, false, true, true)]
#[case("names_", false, false, false, false, true)]
#[case("w_", false, false, false, false, false)]
fn specifiers_are_read_from_leading_text(
    #[case] name: &str,
    #[case] constexpr: bool,
    #[case] inline: bool,
    #[case] is_static: bool,
    #[case] pointer: bool,
    #[case] constant: bool,
) {
    let (document, raw) = widget();
    let tree = SymbolTree::build(&raw);
    let symbol = find(&tree, &document, name);
    assert_eq!(symbol.is_constexpr(), constexpr, "constexpr");
    assert_eq!(symbol.is_inline(), inline, "inline");
    assert_eq!(symbol.is_static(), is_static, "static");
    assert_eq!(symbol.is_pointer(), pointer, "pointer");
    assert_eq!(symbol.is_const(), constant, "const");
}

#[test]
fn typedefs_and_aliases_need_the_keyword() {
    let (document, raw) = widget();
    let tree = SymbolTree::build(&raw);
    let size = find(&tree, &document, "Size");
    assert!(size.is_typedef());
    assert!(!size.is_type_alias());

    let handle = find(&tree, &document, "Handle");
    assert!(handle.is_type_alias());
    assert!(!handle.is_typedef());

    let nested = find(&tree, &document, "Nested");
    assert!(nested.might_be_typedef_or_type_alias());
    assert!(!nested.is_typedef());
    assert!(!nested.is_type_alias());

    let widget = find(&tree, &document, "Widget");
    assert!(!widget.is_typedef(), "typedefs in the body are not the class's own");
    assert!(!widget.is_type_alias());
}

#[test]
fn member_variables_and_base_names() {
    let (document, raw) = widget();
    let tree = SymbolTree::build(&raw);
    let w = find(&tree, &document, "w_");
    assert!(w.is_member_variable());
    assert_eq!(w.base_name(), "w");
    assert_eq!(w.indentation(), "    ");
    assert!(!find(&tree, &document, "resize").is_member_variable());
}
