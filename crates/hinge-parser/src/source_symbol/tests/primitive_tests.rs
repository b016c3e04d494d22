use super::*;
use hinge_core::Location;
use hinge_core::memory::MemoryWorkspace;

const TYPES: &str = "\
enum class Color { Red, Green };
typedef unsigned int Id;
using Alias = Id;
using Loop = Cycle;
using Cycle = Loop;
struct Point { int x; };
";

const WIDGET: &str = "\
class Widget {
    int count_;
    std::vector<int> items_;
    Color color_;
    Alias id_;
    Point origin_;
    Loop loop_;
    Widget *next_;
};
";

/// The range of the first `needle` after the first `anchor`.
fn word_after(document: &SourceDocument, anchor: &str, needle: &str) -> Range {
    let text = document.text();
    let start = offset_of(text, needle, offset_of(text, anchor, 0) + anchor.len());
    Range::new(document.position_at(start), document.position_at(start + needle.len()))
}

fn link(workspace: &mut MemoryWorkspace, from: (&SourceDocument, Range), to: (&SourceDocument, Range)) {
    workspace.link_declaration(Location::new(from.0.uri(), from.1), Location::new(to.0.uri(), to.1));
}

fn fixture() -> (MemoryWorkspace, SourceDocument, Vec<RawSymbol>) {
    let mut workspace = MemoryWorkspace::new();
    let types_handle = workspace.add_document("file:///types.h", TYPES);
    let types: &SourceDocument = &types_handle;
    let widget = SourceDocument::new("file:///widget.h", WIDGET);
    workspace.add_document(widget.uri(), WIDGET);

    workspace.set_symbols(
        types.uri(),
        vec![
            raw(types, "Color", SymbolKind::Enum, "enum class Color", "};"),
            raw(types, "Id", SymbolKind::Interface, "typedef unsigned", "Id"),
            raw(types, "Alias", SymbolKind::Class, "using Alias", "Id"),
            raw(types, "Loop", SymbolKind::TypeParameter, "using Loop", "Cycle"),
            raw(types, "Cycle", SymbolKind::Class, "using Cycle", "Loop"),
            raw(types, "Point", SymbolKind::Struct, "struct Point", "};"),
        ],
    );

    link(&mut workspace, (&widget, word_after(&widget, "\n", "Color")), (types, word_after(types, "enum class ", "Color")));
    link(&mut workspace, (&widget, word_after(&widget, "\n", "Alias")), (types, word_after(types, "using ", "Alias")));
    link(&mut workspace, (types, word_after(types, "using Alias = ", "Id")), (types, word_after(types, "unsigned int ", "Id")));
    link(&mut workspace, (&widget, word_after(&widget, "\n", "Point")), (types, word_after(types, "struct ", "Point")));
    link(&mut workspace, (&widget, word_after(&widget, "\n", "Loop")), (types, word_after(types, "using ", "Loop")));
    link(&mut workspace, (types, word_after(types, "using Loop = ", "Cycle")), (types, word_after(types, "Cycle;\nusing ", "Cycle")));
    link(&mut workspace, (types, word_after(types, "using Cycle = ", "Loop")), (types, word_after(types, "using ", "Loop")));

    let members = ["count_", "items_", "color_", "id_", "origin_", "loop_", "next_"]
        .into_iter()
        .map(|name| {
            let line = WIDGET.lines().find(|line| line.contains(name)).unwrap_or_default().trim();
            raw(&widget, name, SymbolKind::Field, line.trim_end_matches(';'), name)
        })
        .collect();
    let class = raw(&widget, "Widget", SymbolKind::Class, "class Widget", "next_;\n};").with_children(members);
    (workspace, widget, vec![class])
}

#[tokio::test]
async fn builtin_and_resolved_types() {
    let (workspace, document, raw) = fixture();
    let tree = SymbolTree::build(&raw);
    let options = ResolveOptions::default();

    for (name, expected) in [
        ("count_", true),
        ("items_", false),
        ("color_", true),
        ("id_", true),
        ("origin_", false),
        ("next_", false),
    ] {
        let member = find(&tree, &document, name);
        assert_eq!(member.is_primitive(&workspace, &options).await, expected, "{name}");
    }
}

#[tokio::test]
async fn alias_cycles_terminate() {
    let (workspace, document, raw) = fixture();
    let tree = SymbolTree::build(&raw);
    let looped = find(&tree, &document, "loop_");
    assert!(!looped.is_primitive(&workspace, &ResolveOptions::default()).await);
}

#[tokio::test]
async fn cross_file_resolution_can_be_disabled() {
    let (workspace, document, raw) = fixture();
    let tree = SymbolTree::build(&raw);
    let options = ResolveOptions {
        cross_file: false,
        ..ResolveOptions::default()
    };
    assert!(find(&tree, &document, "count_").is_primitive(&workspace, &options).await);
    assert!(!find(&tree, &document, "color_").is_primitive(&workspace, &options).await);
}

#[tokio::test]
async fn alias_depth_is_bounded() {
    let (workspace, document, raw) = fixture();
    let tree = SymbolTree::build(&raw);
    let shallow = ResolveOptions {
        cross_file: true,
        max_depth: 1,
    };
    assert!(find(&tree, &document, "color_").is_primitive(&workspace, &shallow).await);
    assert!(!find(&tree, &document, "id_").is_primitive(&workspace, &shallow).await);
}

#[tokio::test]
async fn typedefs_resolve_their_own_type() {
    let (workspace, _, _) = fixture();
    let handle = workspace.document("file:///types.h").expect("types document");
    let types: &SourceDocument = &handle;
    let raw = hinge_core::SymbolProvider::document_symbols(&workspace, types).await;
    let tree = SymbolTree::build(&raw);

    assert!(find(&tree, types, "Id").is_primitive(&workspace, &ResolveOptions::default()).await);
    assert!(find(&tree, types, "Alias").is_primitive(&workspace, &ResolveOptions::default()).await);
    assert!(!find(&tree, types, "Point").is_primitive(&workspace, &ResolveOptions::default()).await);
}
