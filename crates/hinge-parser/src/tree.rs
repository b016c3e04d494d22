//! Normalized symbol tree built from an oracle's raw outline.
//!
//! The tree is an arena: nodes live in one `Vec` and refer to their parent
//! and children by [`SymbolId`]. It is built once per scan and never
//! mutated afterwards.

use hinge_core::{Position, Range, RawSymbol, SymbolKind};
use std::ops::Deref;

use crate::names::{self, is_self_qualified, strip_template_args};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(usize);

/// One normalized node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Plain identifier, scope and parameters removed.
    pub name: String,
    /// The richest name text the oracle gave, used to recover qualifiers.
    pub signature: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    pub detail: String,
    parent: Option<SymbolId>,
    children: Vec<SymbolId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTree {
    nodes: Vec<Symbol>,
    roots: Vec<SymbolId>,
}

impl SymbolTree {
    /// Normalize a raw outline.
    ///
    /// Guarantees on the result, whatever the input looked like:
    /// - every `selection_range` lies inside its `range`
    /// - every child's range lies inside its parent's range (children that
    ///   escape are hoisted to the nearest ancestor level that contains them)
    /// - children are ordered by `(range.start, range.end)`
    #[must_use]
    pub fn build(raw: &[RawSymbol]) -> Self {
        let mut tree = Self::default();
        let (roots, escaped) = tree.build_level(raw.iter().collect(), None);
        debug_assert!(escaped.is_empty(), "top level has no bounds to escape");
        tree.roots = roots;
        tree
    }

    fn build_level<'r>(
        &mut self,
        mut pending: Vec<&'r RawSymbol>,
        parent: Option<SymbolId>,
    ) -> (Vec<SymbolId>, Vec<&'r RawSymbol>) {
        let bounds = parent.map(|id| self.nodes[id.0].range);
        let mut level = Vec::new();
        let mut escaped = Vec::new();

        while let Some(raw) = pending.pop() {
            let range = covering_range(raw);
            if bounds.is_some_and(|bounds| !bounds.contains_range(&range)) {
                escaped.push(raw);
                continue;
            }
            let id = self.push_node(raw, range, parent);
            let (children, hoisted) = self.build_level(raw.children.iter().collect(), Some(id));
            self.nodes[id.0].children = children;
            pending.extend(hoisted);
            level.push(id);
        }

        level.sort_by_key(|id| (self.nodes[id.0].range.start, self.nodes[id.0].range.end));
        (level, escaped)
    }

    fn push_node(&mut self, raw: &RawSymbol, range: Range, parent: Option<SymbolId>) -> SymbolId {
        let name = match names::normalize_name(&raw.name) {
            normalized if normalized.is_empty() => raw.name.clone(),
            normalized => normalized,
        };
        let parent_node = parent.map(|id| &self.nodes[id.0]);
        let signature = recover_signature(raw, parent_node);
        let kind = match raw.kind {
            SymbolKind::Property | SymbolKind::Field if names_a_call(&signature, &name) => SymbolKind::Method,
            kind => kind,
        };

        let id = SymbolId(self.nodes.len());
        self.nodes.push(Symbol {
            name,
            signature,
            kind,
            range,
            selection_range: raw.selection_range,
            detail: raw.detail.clone(),
            parent,
            children: Vec::new(),
        });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<SymbolRef<'_>> {
        (id.0 < self.nodes.len()).then_some(SymbolRef { tree: self, id })
    }

    pub fn roots(&self) -> impl DoubleEndedIterator<Item = SymbolRef<'_>> + ExactSizeIterator {
        self.roots.iter().map(|&id| SymbolRef { tree: self, id })
    }

    /// All symbols in pre-order (source order).
    #[must_use]
    pub fn iter(&self) -> Vec<SymbolRef<'_>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<SymbolId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(SymbolRef { tree: self, id });
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// The innermost symbol whose range contains `position`.
    #[must_use]
    pub fn symbol_at(&self, position: Position) -> Option<SymbolRef<'_>> {
        let mut found = None;
        let mut level = &self.roots;
        while let Some(&id) = level.iter().find(|id| self.nodes[id.0].range.contains(position)) {
            found = Some(SymbolRef { tree: self, id });
            level = &self.nodes[id.0].children;
        }
        found
    }

    /// The innermost symbol whose name contains `position`.
    #[must_use]
    pub fn symbol_at_selection(&self, position: Position) -> Option<SymbolRef<'_>> {
        self.iter()
            .into_iter()
            .rev()
            .find(|symbol| symbol.selection_range.contains(position))
    }

    /// Namespaces and classes strictly enclosing `position`, outermost
    /// first. A position on a scope's first or last character (just before
    /// `namespace`, just after `};`) is outside it.
    #[must_use]
    pub fn enclosing_scopes(&self, position: Position) -> Vec<SymbolRef<'_>> {
        let mut scopes = Vec::new();
        let mut current = self.symbol_at(position);
        while let Some(symbol) = current {
            let inside = symbol.range.start < position && position < symbol.range.end;
            if inside && (symbol.is_namespace() || symbol.is_class_or_struct()) {
                scopes.push(symbol);
            }
            current = symbol.parent();
        }
        scopes.reverse();
        scopes
    }

    /// Follow a chain of nested namespace names from the top level.
    #[must_use]
    pub fn find_namespace(&self, path: &[String]) -> Option<SymbolRef<'_>> {
        let mut level = &self.roots;
        let mut found = None;
        for name in path {
            let &id = level
                .iter()
                .find(|id| self.nodes[id.0].kind == SymbolKind::Namespace && &self.nodes[id.0].name == name)?;
            found = Some(SymbolRef { tree: self, id });
            level = &self.nodes[id.0].children;
        }
        found
    }
}

fn covering_range(raw: &RawSymbol) -> Range {
    if raw.range.contains_range(&raw.selection_range) {
        raw.range
    } else {
        raw.range.union(&raw.selection_range)
    }
}

/// Prefer a full signature embedded in `detail`; otherwise qualify member
/// names with their class so every member carries its owner.
fn recover_signature(raw: &RawSymbol, parent: Option<&Symbol>) -> String {
    let name = names::normalize_name(&raw.name);
    let detail = raw.detail.trim();
    if !name.is_empty() && detail.contains(name.as_str()) && (detail.contains('(') || detail.contains("::")) {
        return detail.to_string();
    }
    if raw.name.contains("::") || raw.name.contains('(') {
        return raw.name.clone();
    }
    match parent {
        Some(parent) if matches!(parent.kind, SymbolKind::Class | SymbolKind::Struct) => {
            format!("{}::{}", parent.name, raw.name)
        }
        _ => raw.name.clone(),
    }
}

fn names_a_call(signature: &str, name: &str) -> bool {
    signature
        .match_indices(name)
        .any(|(index, _)| signature[index + name.len()..].trim_start().starts_with('('))
}

/// A borrowed view of one node together with its tree.
#[derive(Debug, Clone, Copy)]
pub struct SymbolRef<'t> {
    tree: &'t SymbolTree,
    id: SymbolId,
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SymbolRef<'_> {}

impl Deref for SymbolRef<'_> {
    type Target = Symbol;

    fn deref(&self) -> &Symbol {
        &self.tree.nodes[self.id.0]
    }
}

impl<'t> SymbolRef<'t> {
    #[must_use]
    pub const fn id(&self) -> SymbolId {
        self.id
    }

    #[must_use]
    pub const fn tree(&self) -> &'t SymbolTree {
        self.tree
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree.nodes[self.id.0]
            .parent
            .map(|id| Self { tree: self.tree, id })
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + 't {
        let tree = self.tree;
        tree.nodes[self.id.0]
            .children
            .iter()
            .map(move |&id| Self { tree, id })
    }

    /// This symbol's level: its parent's children, or the tree's roots.
    #[must_use]
    pub fn siblings(&self) -> Vec<Self> {
        let tree = self.tree;
        let ids = self
            .parent()
            .map_or(&tree.roots, |parent| &tree.nodes[parent.id.0].children);
        ids.iter().map(|&id| Self { tree, id }).collect()
    }

    /// Parent, grandparent, ... up to the top level.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        std::iter::successors(self.parent(), Self::parent).collect()
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Function | SymbolKind::Method | SymbolKind::Constructor | SymbolKind::Operator
        )
    }

    /// Some oracles mark only in-class declarations as constructors and
    /// report out-of-line definitions as methods, so the name is checked too.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        if self.kind == SymbolKind::Constructor {
            return true;
        }
        if !self.is_function() || self.name.starts_with('~') {
            return false;
        }
        let named_after_parent = self
            .parent()
            .is_some_and(|parent| parent.is_class_or_struct() && strip_template_args(&parent.name) == self.name);
        named_after_parent || is_self_qualified(&self.signature, false)
    }

    #[must_use]
    pub fn is_destructor(&self) -> bool {
        self.is_function() && (self.name.starts_with('~') || is_self_qualified(&self.signature, true))
    }

    #[must_use]
    pub fn is_class_or_struct(&self) -> bool {
        matches!(self.kind, SymbolKind::Class | SymbolKind::Struct)
    }

    #[must_use]
    pub fn is_namespace(&self) -> bool {
        self.kind == SymbolKind::Namespace
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Variable | SymbolKind::Constant | SymbolKind::Field | SymbolKind::Property
        )
    }

    #[must_use]
    pub fn is_member_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Field | SymbolKind::Property)
            && self.parent().is_some_and(|parent| parent.is_class_or_struct())
    }

    /// A cheap pre-filter: oracles report typedefs and aliases under one of
    /// these kinds, alongside plenty of real classes.
    #[must_use]
    pub fn might_be_typedef_or_type_alias(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Interface | SymbolKind::Class | SymbolKind::TypeParameter
        )
    }

    #[must_use]
    pub fn base_name(&self) -> String {
        names::base_name(&self.name)
    }
}
