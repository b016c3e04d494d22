//! Line-indexed, read-only view of a source file.

use crate::edit::TextEdit;
use crate::{Position, Range};

/// An immutable text buffer with a line index.
///
/// Offsets are byte offsets into [`SourceDocument::text`]; positions are
/// line/character pairs where `character` counts Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    uri: String,
    text: String,
    line_starts: Vec<usize>,
    eol: &'static str,
}

/// A single line of a [`SourceDocument`], without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub line: u32,
    pub text: &'a str,
    pub range: Range,
    /// Character index of the first non-whitespace character, or the line
    /// length when the line is blank.
    pub first_non_whitespace: u32,
}

impl<'a> TextLine<'a> {
    #[must_use]
    pub fn is_empty_or_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The leading whitespace of the line.
    #[must_use]
    pub fn indentation(&self) -> &'a str {
        let trimmed = self.text.trim_start();
        &self.text[..self.text.len() - trimmed.len()]
    }
}

impl SourceDocument {
    #[must_use]
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(index, _)| index + 1));
        let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            uri: uri.into(),
            text,
            line_starts,
            eol,
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The dominant end-of-line marker (`"\r\n"` if any line uses it).
    #[must_use]
    pub const fn eol(&self) -> &'static str {
        self.eol
    }

    #[must_use]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.line_starts.len()).unwrap_or(u32::MAX)
    }

    /// Byte range of `line` excluding its terminator.
    fn line_bounds(&self, line: usize) -> (usize, usize) {
        let start = self.line_starts[line];
        let mut end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        (start, end)
    }

    fn clamp_line(&self, line: u32) -> usize {
        (line as usize).min(self.line_starts.len() - 1)
    }

    /// Byte offset of `position`, clamped to the document.
    #[must_use]
    pub fn offset_at(&self, position: Position) -> usize {
        let (start, end) = self.line_bounds(self.clamp_line(position.line));
        let line_text = &self.text[start..end];
        line_text
            .char_indices()
            .nth(position.character as usize)
            .map_or(end, |(index, _)| start + index)
    }

    /// Position of byte `offset`, clamped to the document and snapped back
    /// to a character boundary.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let (start, end) = self.line_bounds(line);
        let character = self.text[start..offset.min(end).max(start)].chars().count();
        Position::new(
            u32::try_from(line).unwrap_or(u32::MAX),
            u32::try_from(character).unwrap_or(u32::MAX),
        )
    }

    /// The line at index `line`, clamped to the last line.
    #[must_use]
    pub fn line_at(&self, line: u32) -> TextLine<'_> {
        let index = self.clamp_line(line);
        let (start, end) = self.line_bounds(index);
        let text = &self.text[start..end];
        let first_non_whitespace = text
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map_or_else(|| text.chars().count(), |(byte, _)| text[..byte].chars().count());
        let line = u32::try_from(index).unwrap_or(u32::MAX);
        TextLine {
            line,
            text,
            range: Range::new(self.position_at(start), self.position_at(end)),
            first_non_whitespace: u32::try_from(first_non_whitespace).unwrap_or(u32::MAX),
        }
    }

    /// The text covered by `range`.
    #[must_use]
    pub fn text_in(&self, range: Range) -> &str {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        &self.text[start..end]
    }

    /// The position just past the last character.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.position_at(self.text.len())
    }

    /// Apply `edits` to a copy of the text. Edits must not overlap; inserts
    /// at the same position land in the order they were given.
    #[must_use]
    pub fn apply_edits(&self, edits: &[TextEdit]) -> String {
        let mut ordered: Vec<_> = edits
            .iter()
            .enumerate()
            .map(|(index, edit)| {
                (self.offset_at(edit.range.start), self.offset_at(edit.range.end), index, edit)
            })
            .collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(b.2.cmp(&a.2)));

        let mut text = self.text.clone();
        for (start, end, _, edit) in ordered {
            text.replace_range(start..end.max(start), &edit.new_text);
        }
        text
    }
}
