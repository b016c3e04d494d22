//! Text edits handed to the edit sink.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Position, Range};

/// A single replacement inside one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            range: Range::at(position),
            new_text: text.into(),
        }
    }

    #[must_use]
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: text.into(),
        }
    }

    #[must_use]
    pub fn delete(range: Range) -> Self {
        Self {
            range,
            new_text: String::new(),
        }
    }
}

/// A batch of edits across one or more files, applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub changes: BTreeMap<String, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, uri: impl Into<String>, edit: TextEdit) {
        self.changes.entry(uri.into()).or_default().push(edit);
    }

    pub fn insert(&mut self, uri: impl Into<String>, position: Position, text: impl Into<String>) {
        self.push(uri, TextEdit::insert(position, text));
    }

    pub fn replace(&mut self, uri: impl Into<String>, range: Range, text: impl Into<String>) {
        self.push(uri, TextEdit::replace(range, text));
    }

    pub fn delete(&mut self, uri: impl Into<String>, range: Range) {
        self.push(uri, TextEdit::delete(range));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.values().all(Vec::is_empty)
    }

    /// Edits targeting `uri`, in insertion order.
    #[must_use]
    pub fn edits_for(&self, uri: &str) -> &[TextEdit] {
        self.changes.get(uri).map_or(&[], Vec::as_slice)
    }

    /// Number of files touched.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.changes.values().filter(|edits| !edits.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_group_by_file() {
        let mut edit = WorkspaceEdit::new();
        edit.insert("file:///a.h", Position::new(0, 0), "x");
        edit.delete("file:///b.cpp", Range::at(Position::new(1, 0)));
        edit.insert("file:///a.h", Position::new(2, 0), "y");

        assert_eq!(edit.file_count(), 2);
        assert_eq!(edit.edits_for("file:///a.h").len(), 2);
        assert!(edit.edits_for("file:///missing.h").is_empty());
        assert!(!edit.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_text_field() {
        let edit = TextEdit::insert(Position::new(0, 0), "int x;");
        let value = serde_json::to_value(&edit).expect("serialize edit");
        assert_eq!(value["newText"], "int x;");
    }
}
