use hinge_config::HingeConfig;
use hinge_core::{Location, Range, SourceDocument, Workspace};
use hinge_parser::names::is_anonymous;
use hinge_parser::{SourceSymbol, SymbolRef, SymbolTree, mask};

use super::{after_last_code_line, after_symbol, before_symbol};
use crate::position::ProposedPosition;

/// Knobs for [`find_position_for_function_definition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Siblings checked on each side of the declaration.
    pub sibling_limit: usize,
    /// Indent a definition placed into an empty namespace.
    pub indent_namespace_body: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sibling_limit: 5,
            indent_namespace_body: false,
        }
    }
}

impl From<&HingeConfig> for SearchOptions {
    fn from(config: &HingeConfig) -> Self {
        Self {
            sibling_limit: config.general.sibling_search_limit,
            indent_namespace_body: config.formatting.indent_namespace_body,
        }
    }
}

/// Propose where the definition of `declaration` should go in `target`.
///
/// In order:
/// 1. after the definition of the nearest preceding sibling that has one in
///    `target`
/// 2. before the definition of the nearest following sibling
/// 3. inside the innermost of the declaration's namespaces that `target`
///    also opens (after its last member, or just inside its braces)
/// 4. below the declaration's class, when `target` is the declaring file
/// 5. after the last top-level symbol of `target`
/// 6. after the last line of code in `target`
///
/// A declaration without a parent going into a document without symbols
/// is placed at the very start.
pub async fn find_position_for_function_definition(
    declaration: &SourceSymbol<'_>,
    target: &SourceDocument,
    workspace: &dyn Workspace,
    options: &SearchOptions,
) -> ProposedPosition {
    let tree = SymbolTree::build(&workspace.document_symbols(target).await);
    if tree.is_empty() && declaration.parent().is_none() {
        tracing::debug!(symbol = %declaration.name, uri = %target.uri(), "target has no symbols, using start of file");
        return ProposedPosition::start_of_document();
    }

    let same_document = declaration.uri() == target.uri();
    let owning_class = outermost_class(declaration.symbol()).filter(|_| same_document);
    let excluded = owning_class.map(|class| class.range);

    let siblings = declaration.symbol().siblings();
    let index = siblings
        .iter()
        .position(|sibling| *sibling == declaration.symbol())
        .unwrap_or_default();
    let limit = options.sibling_limit;

    for sibling in siblings[index.saturating_sub(limit)..index].iter().rev() {
        if let Some(definition) =
            sibling_definition(*sibling, declaration.document(), &tree, target, workspace, excluded).await
        {
            tracing::debug!(symbol = %declaration.name, sibling = %sibling.name, "placing after preceding sibling");
            return after_symbol(&definition);
        }
    }
    for sibling in siblings.iter().skip(index + 1).take(limit) {
        if let Some(definition) =
            sibling_definition(*sibling, declaration.document(), &tree, target, workspace, excluded).await
        {
            tracing::debug!(symbol = %declaration.name, sibling = %sibling.name, "placing before following sibling");
            return before_symbol(&definition);
        }
    }

    if let Some(proposed) = inside_shared_namespace(declaration, &tree, target, options) {
        return proposed;
    }

    if let Some(class) = owning_class {
        tracing::debug!(symbol = %declaration.name, class = %class.name, "placing below class");
        return after_symbol(&SourceSymbol::new(class, declaration.document()));
    }

    if let Some(last) = tree.roots().next_back() {
        tracing::debug!(symbol = %declaration.name, uri = %target.uri(), "placing after last top-level symbol");
        return after_symbol(&SourceSymbol::new(last, target));
    }

    tracing::debug!(symbol = %declaration.name, uri = %target.uri(), "placing at end of code");
    after_last_code_line(target, target.line_count())
}

/// Where `sibling` is defined, if that is in `target` and outside
/// `excluded`.
async fn sibling_definition<'t>(
    sibling: SymbolRef<'_>,
    document: &SourceDocument,
    tree: &'t SymbolTree,
    target: &'t SourceDocument,
    workspace: &dyn Workspace,
    excluded: Option<Range>,
) -> Option<SourceSymbol<'t>> {
    if !sibling.is_function() {
        return None;
    }
    let Some(found) = workspace
        .find_definition(&Location::new(document.uri(), sibling.selection_range))
        .await
    else {
        tracing::trace!(sibling = %sibling.name, "no definition");
        return None;
    };
    if found.uri != target.uri() || excluded.is_some_and(|range| range.contains(found.range.start)) {
        tracing::trace!(sibling = %sibling.name, uri = %found.uri, "definition elsewhere");
        return None;
    }
    let symbol = tree
        .symbol_at_selection(found.range.start)
        .or_else(|| tree.symbol_at(found.range.start))
        .filter(SymbolRef::is_function)?;
    Some(SourceSymbol::new(symbol, target))
}

/// Inside the innermost namespace of `declaration` that `target` opens too.
fn inside_shared_namespace(
    declaration: &SourceSymbol<'_>,
    tree: &SymbolTree,
    target: &SourceDocument,
    options: &SearchOptions,
) -> Option<ProposedPosition> {
    let mut path: Vec<String> = declaration
        .ancestors()
        .into_iter()
        .filter(|ancestor| ancestor.is_namespace() && !is_anonymous(&ancestor.name))
        .map(|ancestor| ancestor.name.clone())
        .collect();
    path.reverse();

    (1..=path.len()).rev().find_map(|depth| {
        let namespace = tree.find_namespace(&path[..depth])?;
        tracing::debug!(symbol = %declaration.name, namespace = %namespace.name, "placing in shared namespace");
        match namespace.children().next_back() {
            Some(last) => Some(after_symbol(&SourceSymbol::new(last, target))),
            None => {
                let from = target.offset_at(namespace.selection_range.end);
                let end = target.offset_at(namespace.range.end).max(from);
                let brace = mask::mask_comments_and_quotes(&target.text()[from..end]).find('{')?;
                let position = target.position_at(from + brace + 1);
                Some(
                    ProposedPosition::inside_empty_scope(namespace.range, position)
                        .with_indent(options.indent_namespace_body),
                )
            }
        }
    })
}

fn outermost_class(symbol: SymbolRef<'_>) -> Option<SymbolRef<'_>> {
    symbol
        .ancestors()
        .into_iter()
        .rev()
        .find(SymbolRef::is_class_or_struct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hinge_core::memory::MemoryWorkspace;
    use hinge_core::{Position, RawSymbol, SymbolKind, SymbolProvider};
    use pretty_assertions::assert_eq;

    fn span(document: &SourceDocument, name: &str, kind: SymbolKind, from: &str, through: &str) -> RawSymbol {
        let text = document.text();
        let start = text.find(from).unwrap_or_else(|| panic!("{from:?} not in document"));
        let end = start + text[start..].find(through).unwrap_or_else(|| panic!("{through:?} not after {from:?}")) + through.len();
        let short = name.rsplit("::").next().unwrap_or(name);
        let name_start = start + text[start..].find(&format!("{short}(")).or_else(|| text[start..].find(short)).unwrap_or(0);
        RawSymbol::new(
            name,
            kind,
            Range::new(document.position_at(start), document.position_at(end)),
            Range::new(document.position_at(name_start), document.position_at(name_start + short.len())),
        )
    }

    const HEADER: &str = "\
namespace app {
class Widget {
public:
    void first();
    void second();
    void third();
};
}
";

    struct Fixture {
        workspace: MemoryWorkspace,
        header: std::sync::Arc<SourceDocument>,
        source: std::sync::Arc<SourceDocument>,
    }

    fn fixture(source_text: &str, source_symbols: impl Fn(&SourceDocument) -> Vec<RawSymbol>) -> Fixture {
        let mut workspace = MemoryWorkspace::new();
        let header = workspace.add_document("file:///widget.h", HEADER);
        let source = workspace.add_document("file:///widget.cpp", source_text);
        let class = span(&header, "Widget", SymbolKind::Class, "class Widget", "};").with_children(vec![
            span(&header, "first", SymbolKind::Method, "void first", ";"),
            span(&header, "second", SymbolKind::Method, "void second", ";"),
            span(&header, "third", SymbolKind::Method, "void third", ";"),
        ]);
        let namespace = span(&header, "app", SymbolKind::Namespace, "namespace app", "};\n}").with_children(vec![class]);
        workspace.set_symbols(header.uri(), vec![namespace]);
        workspace.set_symbols(source.uri(), source_symbols(source.as_ref()));
        Fixture { workspace, header, source }
    }

    fn link(fixture: &mut Fixture, method: &str, definition: &RawSymbol) {
        let header = &fixture.header;
        let from = span(header, method, SymbolKind::Method, &format!("void {method}"), ";");
        fixture.workspace.link_definition(
            Location::new(header.uri(), from.selection_range),
            Location::new(fixture.source.uri(), definition.selection_range),
        );
    }

    async fn propose(fixture: &Fixture, method: &str) -> ProposedPosition {
        let raw = fixture.workspace.document_symbols(&fixture.header).await;
        let tree = SymbolTree::build(&raw);
        let symbol = tree.iter().into_iter().find(|symbol| symbol.name == method).expect("method");
        let declaration = SourceSymbol::new(symbol, &fixture.header);
        find_position_for_function_definition(&declaration, &fixture.source, &fixture.workspace, &SearchOptions::default())
            .await
    }

    #[tokio::test]
    async fn follows_preceding_sibling_definition() {
        let text = "namespace app {\nvoid Widget::first()\n{\n}\n\nvoid Widget::third()\n{\n}\n}\n";
        let first = |doc: &SourceDocument| span(doc, "Widget::first", SymbolKind::Method, "void Widget::first", "}");
        let third = |doc: &SourceDocument| span(doc, "Widget::third", SymbolKind::Method, "void Widget::third", "}");
        let mut fixture = fixture(text, |doc| {
            vec![span(doc, "app", SymbolKind::Namespace, "namespace app", "}\n}").with_children(vec![first(doc), third(doc)])]
        });
        let (first_def, third_def) = (first(fixture.source.as_ref()), third(fixture.source.as_ref()));
        link(&mut fixture, "first", &first_def);
        link(&mut fixture, "third", &third_def);

        let proposed = propose(&fixture, "second").await;
        assert_eq!(proposed.position, Position::new(3, 1));
        assert_eq!(proposed.side, crate::position::Side::After);
    }

    #[tokio::test]
    async fn falls_back_to_following_sibling() {
        let text = "// Third.\nvoid app::Widget::third()\n{\n}\n";
        let third = |doc: &SourceDocument| span(doc, "app::Widget::third", SymbolKind::Method, "void app", "}");
        let mut fixture = fixture(text, |doc| vec![third(doc)]);
        let third_def = third(fixture.source.as_ref());
        link(&mut fixture, "third", &third_def);

        let proposed = propose(&fixture, "first").await;
        assert_eq!(proposed.position, Position::new(0, 0));
        assert_eq!(proposed.side, crate::position::Side::Before);
    }

    #[tokio::test]
    async fn empty_shared_namespace_is_entered() {
        let text = "#include \"widget.h\"\n\nnamespace app {\n}\n";
        let fixture = fixture(text, |doc| vec![span(doc, "app", SymbolKind::Namespace, "namespace app", "}")]);

        let proposed = propose(&fixture, "second").await;
        assert!(proposed.empty_scope);
        assert_eq!(proposed.position, Position::new(2, 15));
    }

    #[tokio::test]
    async fn unrelated_target_appends_after_last_symbol() {
        let text = "#include \"widget.h\"\n\nint helper()\n{\n    return 1;\n}\n";
        let fixture = fixture(text, |doc| vec![span(doc, "helper", SymbolKind::Function, "int helper", "}")]);

        let proposed = propose(&fixture, "second").await;
        assert_eq!(proposed.position, Position::new(5, 1));
    }

    #[tokio::test]
    async fn member_into_empty_source_goes_after_includes() {
        let text = "#include \"widget.h\"\n";
        let fixture = fixture(text, |_| Vec::new());

        let proposed = propose(&fixture, "second").await;
        assert_eq!(proposed.position, Position::new(0, 19));
    }

    #[tokio::test]
    async fn same_file_definition_goes_below_class() {
        let fixture = fixture("", |_| Vec::new());
        let raw = fixture.workspace.document_symbols(&fixture.header).await;
        let tree = SymbolTree::build(&raw);
        let symbol = tree.iter().into_iter().find(|symbol| symbol.name == "second").expect("method");
        let declaration = SourceSymbol::new(symbol, &fixture.header);

        let proposed = find_position_for_function_definition(
            &declaration,
            &fixture.header,
            &fixture.workspace,
            &SearchOptions::default(),
        )
        .await;
        // Inside `namespace app`, after its last member: the class.
        assert_eq!(proposed.position, Position::new(6, 2));
    }
}
