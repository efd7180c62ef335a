//! Read-only views over trees and queries for inspection front ends.
//!
//! An inspector shows the syntax tree of the current text, the node under
//! the cursor, and how many patterns, matches, and captures a query
//! produces. None of this affects matching or rewriting.

use std::fmt;
use std::ops::Range;

use crate::matcher::Matcher;
use crate::parser::ParseResult;
use crate::query::Query;
use crate::source::TextPosition;

/// Summary of one syntax node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Grammar node kind, e.g. `function_definition`.
    pub kind: &'static str,
    /// Field name under which the parent holds this node.
    pub field_name: Option<&'static str>,
    /// Whether the node is named in the grammar.
    pub is_named: bool,
    /// Whether the node is an ERROR node.
    pub is_error: bool,
    /// Whether the node was inserted by error recovery.
    pub is_missing: bool,
    /// Byte range of the node.
    pub byte_range: Range<usize>,
    /// Zero-based start position.
    pub start: TextPosition,
    /// Zero-based end position.
    pub end: TextPosition,
    /// Child summaries in document order.
    pub children: Vec<Self>,
}

impl NodeSummary {
    /// Summarises `node` without descending into its children.
    #[must_use]
    pub fn from_node(node: tree_sitter::Node<'_>) -> Self {
        Self {
            kind: node.kind(),
            field_name: None,
            is_named: node.is_named(),
            is_error: node.is_error(),
            is_missing: node.is_missing(),
            byte_range: node.byte_range(),
            start: node.start_position().into(),
            end: node.end_position().into(),
            children: Vec::new(),
        }
    }

    /// Returns the number of nodes in this subtree, including itself.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .map(Self::node_count)
            .fold(1, usize::saturating_add)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}")?;
        if let Some(field) = self.field_name {
            write!(f, "{field}: ")?;
        }
        if self.is_missing {
            write!(f, "MISSING ")?;
        }
        if self.is_named {
            write!(f, "{}", self.kind)?;
        } else {
            write!(f, "{:?}", self.kind)?;
        }
        writeln!(
            f,
            " [{}, {}] - [{}, {}]",
            self.start.line, self.start.column, self.end.line, self.end.column
        )?;
        for child in &self.children {
            child.write_indented(f, depth.saturating_add(1))?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Builds an outline of the whole tree.
///
/// With `named_only`, anonymous nodes such as punctuation are left out;
/// ERROR and MISSING nodes are always kept.
#[must_use]
pub fn outline(parsed: &ParseResult, named_only: bool) -> NodeSummary {
    summarise(parsed.root_node(), None, named_only)
}

fn summarise(
    node: tree_sitter::Node<'_>,
    field_name: Option<&'static str>,
    named_only: bool,
) -> NodeSummary {
    let mut summary = NodeSummary::from_node(node);
    summary.field_name = field_name;

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if !named_only || child.is_named() || child.is_error() || child.is_missing() {
                summary
                    .children
                    .push(summarise(child, cursor.field_name(), named_only));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    summary
}

/// Returns the innermost named node covering `offset`.
///
/// Returns `None` when the offset lies past the end of the text.
#[must_use]
pub fn node_at_offset(parsed: &ParseResult, offset: usize) -> Option<tree_sitter::Node<'_>> {
    if offset > parsed.source().len() {
        return None;
    }
    parsed
        .root_node()
        .named_descendant_for_byte_range(offset, offset)
}

/// Match statistics for one query over one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    /// Number of patterns in the query.
    pub pattern_count: usize,
    /// Number of matches found.
    pub match_count: usize,
    /// Total number of captures across all matches.
    pub capture_count: usize,
}

impl QueryStats {
    /// Runs `query` over `parsed` and counts the results.
    #[must_use]
    pub fn collect(query: &Query, parsed: &ParseResult) -> Self {
        let mut matcher = Matcher::new();
        let (match_count, capture_count) = matcher
            .execute(query, parsed)
            .fold((0_usize, 0_usize), |(matches, captures), found| {
                (
                    matches.saturating_add(1),
                    captures.saturating_add(found.captures().len()),
                )
            });

        Self {
            pattern_count: query.pattern_count(),
            match_count,
            capture_count,
        }
    }

    /// Returns whether the query is compiled but finds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pattern_count == 0 || self.match_count == 0
    }
}

impl fmt::Display for QueryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patterns, {} matches, {} captures",
            self.pattern_count, self.match_count, self.capture_count
        )
    }
}
