//! Query execution over parsed syntax trees.
//!
//! A [`Matcher`] runs a compiled [`Query`] against a [`ParseResult`] and
//! yields [`QueryMatch`] values lazily, in pre-order traversal position.
//! When a query holds several patterns their matches interleave by where they
//! occur in the tree, not by pattern order. Text predicates such as `#eq?`
//! and `#match?` are applied before a match is yielded.
//!
//! Every call to [`Matcher::execute`] starts a fresh traversal, so a matcher
//! can be reused for any number of queries and trees.

mod capture;

use streaming_iterator::StreamingIterator;

use crate::parser::ParseResult;
use crate::query::Query;

pub use capture::{CapturedNode, QueryMatch};

/// Executes compiled queries against syntax trees.
pub struct Matcher {
    cursor: tree_sitter::QueryCursor,
}

impl Matcher {
    /// Creates a matcher with a fresh query cursor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: tree_sitter::QueryCursor::new(),
        }
    }

    /// Starts a new traversal of `parsed` with `query`.
    ///
    /// The returned sequence is lazy and finite. Nodes referenced by its
    /// matches borrow from `parsed` and cannot outlive it.
    pub fn execute<'a, 't>(
        &'a mut self,
        query: &'a Query,
        parsed: &'t ParseResult,
    ) -> Matches<'a, 't> {
        let source = parsed.source();
        let inner = self
            .cursor
            .matches(query.inner(), parsed.root_node(), source.as_bytes());
        Matches {
            inner,
            capture_names: query.capture_names(),
            source,
        }
    }

    /// Returns the first match in traversal order, if any.
    pub fn first_match<'a, 't>(
        &'a mut self,
        query: &'a Query,
        parsed: &'t ParseResult,
    ) -> Option<QueryMatch<'a, 't>>
    where
        't: 'a,
    {
        self.execute(query, parsed).next()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").finish_non_exhaustive()
    }
}

/// Lazy sequence of matches produced by [`Matcher::execute`].
pub struct Matches<'a, 't> {
    inner: tree_sitter::QueryMatches<'a, 't, &'t [u8], &'t [u8]>,
    capture_names: &'a [&'a str],
    source: &'t str,
}

impl<'a, 't> Iterator for Matches<'a, 't> {
    type Item = QueryMatch<'a, 't>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        Some(QueryMatch::from_raw(raw, self.capture_names, self.source))
    }
}

impl std::fmt::Debug for Matches<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matches")
            .field("capture_names", &self.capture_names)
            .finish_non_exhaustive()
    }
}

impl Query {
    /// Collects every match of this query in `parsed`.
    #[must_use]
    pub fn find_all<'q, 't>(&'q self, parsed: &'t ParseResult) -> Vec<QueryMatch<'q, 't>> {
        let mut cursor = tree_sitter::QueryCursor::new();
        let capture_names = self.capture_names();
        let source = parsed.source();
        let mut matches = cursor.matches(self.inner(), parsed.root_node(), source.as_bytes());

        let mut found = Vec::new();
        while let Some(raw) = matches.next() {
            found.push(QueryMatch::from_raw(raw, capture_names, source));
        }
        found
    }

    /// Returns whether this query matches anywhere in `parsed`.
    #[must_use]
    pub fn is_match(&self, parsed: &ParseResult) -> bool {
        let mut cursor = tree_sitter::QueryCursor::new();
        let source = parsed.source();
        cursor
            .matches(self.inner(), parsed.root_node(), source.as_bytes())
            .next()
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SupportedLanguage;
    use crate::parser::Parser;

    fn parse_cpp(source: &str) -> ParseResult {
        let mut parser = Parser::new(SupportedLanguage::Cpp).expect("parser init");
        parser.parse(source).expect("tree")
    }

    fn compile_cpp(pattern: &str) -> Query {
        Query::compile(SupportedLanguage::Cpp, pattern).expect("compile")
    }

    #[test]
    fn matches_follow_traversal_order() {
        let parsed = parse_cpp("int foo; int bar;");
        let query = compile_cpp("(identifier) @id");
        let mut matcher = Matcher::new();

        let texts: Vec<_> = matcher
            .execute(&query, &parsed)
            .filter_map(|m| m.capture("id").map(CapturedNode::text))
            .collect();

        assert_eq!(texts, ["foo", "bar"]);
    }

    #[test]
    fn execute_restarts_from_the_beginning() {
        let parsed = parse_cpp("int foo; int bar;");
        let query = compile_cpp("(identifier) @id");
        let mut matcher = Matcher::new();

        let first = matcher.execute(&query, &parsed).count();
        let second = matcher.execute(&query, &parsed).count();

        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn patterns_interleave_by_position() {
        let parsed = parse_cpp("int foo;");
        let query = compile_cpp("(identifier) @id\n(primitive_type) @type");

        let order: Vec<_> = query
            .find_all(&parsed)
            .iter()
            .map(QueryMatch::pattern_index)
            .collect();

        assert_eq!(order, [1, 0]);
    }

    #[test]
    fn predicates_filter_matches() {
        let parsed = parse_cpp("int foo; int bar;");
        let query = compile_cpp("((identifier) @id (#eq? @id \"bar\"))");

        let matches = query.find_all(&parsed);

        assert_eq!(matches.len(), 1);
        let capture = matches
            .first()
            .and_then(|m| m.capture("id"))
            .expect("capture");
        assert_eq!(capture.text(), "bar");
        assert_eq!(capture.byte_range(), 13..16);
        assert_eq!(capture.start_position(), (1, 14));
    }

    #[test]
    fn match_span_covers_outermost_capture() {
        let parsed = parse_cpp("int foo;");
        let query = compile_cpp("(declaration declarator: (identifier) @name) @decl");

        let m = query.find_all(&parsed).into_iter().next().expect("match");

        assert_eq!(m.byte_range(), Some(0..8));
        assert_eq!(m.text(), Some("int foo;"));
        assert_eq!(m.top_node().map(|node| node.kind()), Some("declaration"));
    }

    #[test]
    fn first_match_returns_only_the_first() {
        let parsed = parse_cpp("int foo; int bar;");
        let query = compile_cpp("(identifier) @id");
        let mut matcher = Matcher::new();

        let first = matcher.first_match(&query, &parsed).expect("match");

        assert_eq!(first.capture("id").map(CapturedNode::text), Some("foo"));
    }

    #[test]
    fn no_match_yields_empty_sequence() {
        let parsed = parse_cpp("int foo;");
        let query = compile_cpp("(string_literal) @s");

        assert!(query.find_all(&parsed).is_empty());
        assert!(!query.is_match(&parsed));
    }
}
