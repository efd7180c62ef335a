//! Capture types for query matches.
//!
//! Captures bind query capture names to the nodes they matched, together
//! with the source text those nodes span.

use std::ops::Range;

use crate::position::point_to_one_based;

/// A single captured node.
#[derive(Debug, Clone, Copy)]
pub struct CapturedNode<'q, 't> {
    name: &'q str,
    node: tree_sitter::Node<'t>,
    text: &'t str,
}

impl<'q, 't> CapturedNode<'q, 't> {
    pub(super) fn new(name: &'q str, node: tree_sitter::Node<'t>, source: &'t str) -> Self {
        let text = source.get(node.byte_range()).unwrap_or_default();
        Self { name, node, text }
    }

    /// Returns the capture name, without the `@` prefix.
    #[must_use]
    pub const fn name(&self) -> &'q str {
        self.name
    }

    /// Returns the captured syntax node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Returns the exact source text spanned by the node.
    #[must_use]
    pub const fn text(&self) -> &'t str {
        self.text
    }

    /// Returns the byte range of the node.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the one-based (line, column) where the node starts.
    #[must_use]
    pub fn start_position(&self) -> (u32, u32) {
        point_to_one_based(self.node.start_position())
    }
}

/// One match of a query: the pattern that matched and its captures.
#[derive(Debug, Clone)]
pub struct QueryMatch<'q, 't> {
    pattern_index: usize,
    captures: Vec<CapturedNode<'q, 't>>,
    source: &'t str,
}

impl<'q, 't> QueryMatch<'q, 't> {
    pub(super) fn from_raw(
        raw: &tree_sitter::QueryMatch<'_, 't>,
        capture_names: &'q [&'q str],
        source: &'t str,
    ) -> Self {
        let captures = raw
            .captures
            .iter()
            .filter_map(|capture| {
                let index = usize::try_from(capture.index).ok()?;
                let name = capture_names.get(index).copied()?;
                Some(CapturedNode::new(name, capture.node, source))
            })
            .collect();

        Self {
            pattern_index: raw.pattern_index,
            captures,
            source,
        }
    }

    /// Returns the index of the pattern (within the query) that matched.
    #[must_use]
    pub const fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// Returns the captures in the order the query produced them.
    #[must_use]
    pub fn captures(&self) -> &[CapturedNode<'q, 't>] {
        &self.captures
    }

    /// Returns the first capture called `name`.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&CapturedNode<'q, 't>> {
        self.captures.iter().find(|capture| capture.name == name)
    }

    /// Returns every capture called `name`; quantified captures may bind
    /// several nodes.
    pub fn captures_named<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = &'s CapturedNode<'q, 't>> + 's {
        self.captures
            .iter()
            .filter(move |capture| capture.name == name)
    }

    /// Returns the outermost captured node: the one that starts first and,
    /// among those, ends last.
    #[must_use]
    pub fn top_node(&self) -> Option<tree_sitter::Node<'t>> {
        self.captures
            .iter()
            .map(CapturedNode::node)
            .min_by(|a, b| {
                a.start_byte()
                    .cmp(&b.start_byte())
                    .then_with(|| b.end_byte().cmp(&a.end_byte()))
            })
    }

    /// Returns the byte span covered by all captures of the match.
    ///
    /// For nested captures this is the span of [`QueryMatch::top_node`].
    /// Returns `None` when the pattern captured nothing.
    #[must_use]
    pub fn byte_range(&self) -> Option<Range<usize>> {
        let start = self.captures.iter().map(|c| c.node.start_byte()).min()?;
        let end = self.captures.iter().map(|c| c.node.end_byte()).max()?;
        Some(start..end)
    }

    /// Returns the source text covered by [`QueryMatch::byte_range`].
    #[must_use]
    pub fn text(&self) -> Option<&'t str> {
        self.byte_range().and_then(|range| self.source.get(range))
    }
}
