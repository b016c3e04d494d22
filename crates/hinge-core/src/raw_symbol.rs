use serde::{Deserialize, Serialize};

use crate::{Range, SymbolKind};

/// One node of the symbol outline exactly as an oracle reported it.
///
/// Nothing here is trusted: names may carry scope qualifiers or parameter
/// lists, children may arrive unsorted, and kinds differ between providers.
/// `hinge-parser` normalizes these into a consistent tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSymbol {
    pub name: String,
    #[serde(default)]
    pub detail: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    #[serde(default)]
    pub children: Vec<RawSymbol>,
}

impl RawSymbol {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range, selection_range: Range) -> Self {
        Self {
            name: name.into(),
            detail: String::new(),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}
