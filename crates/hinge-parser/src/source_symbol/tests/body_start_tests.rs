use super::*;

#[test]
fn body_starts_at_first_top_level_brace() {
    let document = SourceDocument::new(
        "file:///a.cpp",
        "void fill(std::vector<int> v = {1, 2}, const char *s = \"{\")\n{\n    run();\n}\n",
    );
    let tree = SymbolTree::build(&[raw(&document, "fill", SymbolKind::Function, "void fill", "}\n")]);
    let fill = find(&tree, &document, "fill");
    assert_eq!(fill.body_start(None), Position::new(1, 0));
}

#[test]
fn declaration_without_body_ends_at_range_end() {
    let document = SourceDocument::new("file:///b.h", "int size() const;\n");
    let tree = SymbolTree::build(&[raw(&document, "size", SymbolKind::Function, "int size", "const")]);
    let size = find(&tree, &document, "size");
    assert_eq!(size.body_start(None), size.range.end);
}

#[test]
fn constructor_body_starts_at_initializer_list() {
    let document = SourceDocument::new(
        "file:///c.cpp",
        "Widget::Widget(int w)\n    : width_(w), height_{0}\n{\n}\n",
    );
    let tree = SymbolTree::build(&[raw(&document, "Widget::Widget", SymbolKind::Method, "Widget::Widget", "}\n")]);
    let ctor = find(&tree, &document, "Widget");
    assert!(ctor.is_constructor());
    assert_eq!(ctor.body_start(None), Position::new(1, 4));
}

#[test]
fn counterpart_marks_definition_as_constructor() {
    let declaration_doc = SourceDocument::new("file:///d.h", "class Widget {\n    Widget(int w);\n};\n");
    let declaration_tree = SymbolTree::build(&[raw(&declaration_doc, "Widget", SymbolKind::Class, "class Widget", "};")
        .with_children(vec![raw_after(&declaration_doc, "Widget", SymbolKind::Constructor, "Widget(", ";", 10)])]);
    let declaration = nth(&declaration_tree, &declaration_doc, "Widget", 1);
    assert!(declaration.is_constructor());

    // An oracle that names the definition without its qualifier.
    let definition_doc = SourceDocument::new("file:///d.cpp", "Widget(int w) : w_(w) {}\n");
    let definition_tree = SymbolTree::build(&[raw(&definition_doc, "Widget", SymbolKind::Function, "Widget(", "{}")]);
    let definition = find(&definition_tree, &definition_doc, "Widget");
    assert!(!definition.is_constructor());
    assert_eq!(definition.body_start(None), Position::new(0, 22));
    assert_eq!(definition.body_start(Some(&declaration)), Position::new(0, 14));
}

#[test]
fn statement_end_includes_trailing_semicolons() {
    let document = SourceDocument::new("file:///e.h", "struct Point { int x; } ;;\nint after;\n");
    let tree = SymbolTree::build(&[raw(&document, "Point", SymbolKind::Struct, "struct Point", "}")]);
    let point = find(&tree, &document, "Point");
    assert_eq!(point.range.end, Position::new(0, 23));
    assert_eq!(point.statement_end(), Position::new(0, 26));
}
