//! Immutable document snapshots addressed by byte offset or line/column.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A zero-based line and byte column inside a [`SourceText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column, counted in UTF-8 bytes from the start of the line.
    pub column: usize,
}

impl TextPosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<tree_sitter::Point> for TextPosition {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

/// Full-document text snapshot.
///
/// Cloning is cheap; the text is shared and never mutated. Line starts are
/// computed once so offset/position conversions are logarithmic.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceText {
    text: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceText {
    /// Captures a snapshot of `text`.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(index, _)| index.saturating_add(1)))
            .collect();
        Self {
            text,
            line_starts: line_starts.into(),
        }
    }

    /// Returns the full text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines. An empty text has one (empty) line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text spanned by `range`, if it lies on character
    /// boundaries inside the snapshot.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Offsets equal to the text length are valid and address the end.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Option<TextPosition> {
        if offset > self.text.len() {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Some(TextPosition::new(line, offset.saturating_sub(line_start)))
    }

    /// Converts a line/column position back to a byte offset.
    ///
    /// Returns `None` when the line does not exist or the column runs past
    /// the end of that line.
    #[must_use]
    pub fn offset_at(&self, position: TextPosition) -> Option<usize> {
        let start = *self.line_starts.get(position.line)?;
        let end = self
            .line_starts
            .get(position.line.saturating_add(1))
            .map_or(self.text.len(), |next| next.saturating_sub(1));
        let offset = start.checked_add(position.column)?;
        (offset <= end).then_some(offset)
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("len", &self.text.len())
            .field("lines", &self.line_starts.len())
            .finish()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Some(TextPosition::new(0, 0)))]
    #[case(3, Some(TextPosition::new(0, 3)))]
    #[case(4, Some(TextPosition::new(1, 0)))]
    #[case(9, Some(TextPosition::new(2, 0)))]
    #[case(10, Some(TextPosition::new(2, 1)))]
    #[case(11, None)]
    fn position_at_maps_offsets_to_lines(
        #[case] offset: usize,
        #[case] expected: Option<TextPosition>,
    ) {
        let text = SourceText::new("int\nfoo;\nx");
        assert_eq!(text.position_at(offset), expected);
    }

    #[rstest]
    #[case(TextPosition::new(0, 0), Some(0))]
    #[case(TextPosition::new(1, 4), Some(8))]
    #[case(TextPosition::new(1, 5), None)]
    #[case(TextPosition::new(2, 1), Some(10))]
    #[case(TextPosition::new(3, 0), None)]
    fn offset_at_rejects_positions_outside_the_line(
        #[case] position: TextPosition,
        #[case] expected: Option<usize>,
    ) {
        let text = SourceText::new("int\nfoo;\nx");
        assert_eq!(text.offset_at(position), expected);
    }

    #[test]
    fn slice_refuses_split_characters() {
        let text = SourceText::new("é");
        assert_eq!(text.slice(0..1), None);
        assert_eq!(text.slice(0..2), Some("é"));
    }

    #[test]
    fn empty_text_has_one_line() {
        let text = SourceText::new("");
        assert!(text.is_empty());
        assert_eq!(text.line_count(), 1);
        assert_eq!(text.position_at(0), Some(TextPosition::new(0, 0)));
    }
}
