//! One-based coordinates for user-facing messages.
//!
//! Tree-sitter points and byte offsets are zero-based; diagnostics and CLI
//! output show one-based lines and columns instead.

fn display_coordinate(value: usize) -> u32 {
    u32::try_from(value.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Converts a Tree-sitter point to one-based (line, column).
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    (display_coordinate(pos.row), display_coordinate(pos.column))
}

/// Converts a byte offset within `text` to one-based (line, column).
///
/// Offsets past the end are clamped to the end of the text; the column
/// counts bytes.
#[must_use]
pub(crate) fn offset_to_one_based(text: &str, byte_offset: usize) -> (u32, u32) {
    let prefix = text.get(..byte_offset.min(text.len())).unwrap_or(text);
    let line = prefix.matches('\n').count();
    let column = prefix.rfind('\n').map_or(prefix.len(), |newline| {
        prefix.len().saturating_sub(newline.saturating_add(1))
    });
    (display_coordinate(line), display_coordinate(column))
}
