//! Iterative, query-driven text rewriting.
//!
//! A [`Transformation`] repeatedly parses the current text, takes the first
//! match of its query, and replaces the span of that match with the rendered
//! template. Every replacement is followed by a full reparse, so later
//! matches always see offsets that are valid for the rewritten text.
//!
//! A template that produces text matching its own pattern would loop
//! forever; the replacement cap turns that into
//! [`TransformationError::MaxReplacementsExceeded`].

use tracing::{debug, trace};

use crate::error::TransformationError;
use crate::matcher::Matcher;
use crate::parser::Parser;
use crate::query::Query;
use crate::template::Template;

/// Default upper bound on replacements in one run.
pub const DEFAULT_MAX_REPLACEMENTS: usize = 100;

/// A single-template rewrite over one text.
#[derive(Debug)]
pub struct Transformation {
    source: String,
    parser: Parser,
    query: Query,
    template: Template,
    max_replacements: usize,
    require_valid_syntax: bool,
    replacements_made: usize,
}

impl Transformation {
    /// Prepares a transformation of `source`.
    ///
    /// The parser is created for the query's grammar, and the template is
    /// parsed and checked against the query's capture names up front.
    ///
    /// # Errors
    ///
    /// Returns [`TransformationError::InvalidTemplate`] or
    /// [`TransformationError::UnknownCapture`] for a bad template, and
    /// [`TransformationError::Parse`] when no parser can be built.
    pub fn new(
        source: impl Into<String>,
        query: Query,
        template: &str,
    ) -> Result<Self, TransformationError> {
        let parser = Parser::new(query.language())
            .map_err(|error| TransformationError::parse(error.to_string()))?;
        let template = Template::parse(template)?;
        template.validate(&query)?;

        Ok(Self {
            source: source.into(),
            parser,
            query,
            template,
            max_replacements: DEFAULT_MAX_REPLACEMENTS,
            require_valid_syntax: false,
            replacements_made: 0,
        })
    }

    /// Sets the replacement cap. Values below one are raised to one.
    #[must_use]
    pub fn with_max_replacements(mut self, max: usize) -> Self {
        self.max_replacements = max.max(1);
        self
    }

    /// Treats trees containing ERROR or MISSING nodes as parse failures.
    #[must_use]
    pub const fn require_valid_syntax(mut self, strict: bool) -> Self {
        self.require_valid_syntax = strict;
        self
    }

    /// Returns the text the transformation starts from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the parsed template.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the replacement cap.
    #[must_use]
    pub const fn max_replacements(&self) -> usize {
        self.max_replacements
    }

    /// Returns the number of replacements made by the last [`run`](Self::run).
    #[must_use]
    pub const fn replacements_made(&self) -> usize {
        self.replacements_made
    }

    /// Rewrites the text until the query no longer matches.
    ///
    /// The source held by the transformation is never modified; the result
    /// is returned as a new string, so a failed run leaves nothing half
    /// rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`TransformationError::Parse`] when the text cannot be
    /// parsed, [`TransformationError::UnboundCapture`] when a match leaves a
    /// template capture unbound, and
    /// [`TransformationError::MaxReplacementsExceeded`] when the cap is
    /// reached.
    pub fn run(&mut self) -> Result<String, TransformationError> {
        self.replacements_made = 0;
        let mut matcher = Matcher::new();
        let mut current = self.source.clone();

        while let Some(next) = self.replace_first(&mut matcher, &current)? {
            current = next;
            self.replacements_made = self.replacements_made.saturating_add(1);
            debug!(replacements = self.replacements_made, "applied replacement");

            if self.replacements_made >= self.max_replacements {
                return Err(TransformationError::MaxReplacementsExceeded {
                    limit: self.max_replacements,
                });
            }
        }

        debug!(
            replacements = self.replacements_made,
            "transformation finished"
        );
        Ok(current)
    }

    /// Performs a single iteration on `text`: parses it, replaces the first
    /// match, and returns the new text.
    ///
    /// Returns `Ok(None)` when nothing matches. Does not touch
    /// [`replacements_made`](Self::replacements_made).
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`run`](Self::run), except that the
    /// replacement cap does not apply.
    pub fn apply_once(&mut self, text: &str) -> Result<Option<String>, TransformationError> {
        let mut matcher = Matcher::new();
        self.replace_first(&mut matcher, text)
    }

    fn replace_first(
        &mut self,
        matcher: &mut Matcher,
        text: &str,
    ) -> Result<Option<String>, TransformationError> {
        let parsed = self
            .parser
            .parse(text)
            .ok_or_else(|| TransformationError::parse("no syntax tree was produced"))?;

        if self.require_valid_syntax {
            if let Some(error) = parsed.errors().into_iter().next() {
                return Err(TransformationError::parse(format!(
                    "{} at {}:{}",
                    error.message, error.line, error.column
                )));
            }
        }

        let Some(found) = matcher.first_match(&self.query, &parsed) else {
            return Ok(None);
        };

        let range = found
            .byte_range()
            .ok_or(TransformationError::UncapturedMatch {
                pattern_index: found.pattern_index(),
            })?;
        if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
            return Err(TransformationError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        let replacement = self.template.render(&found)?;

        trace!(
            pattern = found.pattern_index(),
            start = range.start,
            end = range.end,
            replacement = %replacement,
            "replacing match"
        );

        let mut next = String::with_capacity(text.len().saturating_add(replacement.len()));
        next.push_str(text.get(..range.start).unwrap_or_default());
        next.push_str(&replacement);
        next.push_str(text.get(range.end..).unwrap_or_default());
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SupportedLanguage;
    use rstest::rstest;

    fn transformation(source: &str, pattern: &str, template: &str) -> Transformation {
        let query = Query::compile(SupportedLanguage::Cpp, pattern).expect("query");
        Transformation::new(source, query, template).expect("transformation")
    }

    #[test]
    fn one_iteration_renames_the_first_identifier() {
        let mut rewrite = transformation("int foo;", "(identifier) @id", "${id}_renamed");

        let once = rewrite.apply_once("int foo;").expect("iteration");

        assert_eq!(once.as_deref(), Some("int foo_renamed;"));
        assert_eq!(rewrite.replacements_made(), 0);
    }

    #[test]
    fn run_stops_once_the_predicate_no_longer_matches() {
        let mut rewrite = transformation(
            "int foo;",
            "((identifier) @id (#eq? @id \"foo\"))",
            "${id}_renamed",
        );

        assert_eq!(rewrite.run().expect("run"), "int foo_renamed;");
        assert_eq!(rewrite.replacements_made(), 1);
    }

    #[test]
    fn no_match_returns_input_unchanged() {
        let mut rewrite = transformation("int foo;", "(string_literal) @s", "\"x\"");

        assert_eq!(rewrite.run().expect("run"), "int foo;");
        assert_eq!(rewrite.replacements_made(), 0);
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(100)]
    fn self_matching_rewrite_stops_at_the_cap(#[case] limit: usize) {
        let mut rewrite =
            transformation("int x;", "(identifier) @id", "${id}x").with_max_replacements(limit);

        let error = rewrite.run().expect_err("cap");

        assert_eq!(error, TransformationError::MaxReplacementsExceeded { limit });
        assert_eq!(rewrite.replacements_made(), limit);
    }

    #[test]
    fn strict_mode_rejects_error_trees() {
        let query = Query::compile(SupportedLanguage::Cpp, "(identifier) @id").expect("query");
        let mut rewrite = Transformation::new("int foo(", query, "${id}")
            .expect("transformation")
            .require_valid_syntax(true);

        let error = rewrite.run().expect_err("parse failure");

        assert!(matches!(error, TransformationError::Parse { .. }));
        assert_eq!(rewrite.replacements_made(), 0);
    }

    #[test]
    fn unknown_capture_is_rejected_before_running() {
        let query = Query::compile(SupportedLanguage::Cpp, "(identifier) @id").expect("query");
        let error = Transformation::new("int foo;", query, "${nope}").expect_err("unknown");

        assert_eq!(
            error,
            TransformationError::UnknownCapture {
                name: "nope".to_owned()
            }
        );
    }

    #[test]
    fn source_is_left_untouched_after_failure() {
        let mut rewrite = transformation("int x;", "(identifier) @id", "${id}x");

        assert!(rewrite.run().is_err());
        assert_eq!(rewrite.source(), "int x;");
    }

    #[test]
    fn replacement_count_resets_between_runs() {
        let query = Query::compile(
            SupportedLanguage::Cpp,
            "((identifier) @id (#eq? @id \"a\"))",
        )
        .expect("query");
        let mut rewrite = Transformation::new("int a; int b; int a2;", query, "z")
            .expect("transformation");

        assert_eq!(rewrite.run().expect("first"), "int z; int b; int a2;");
        assert_eq!(rewrite.run().expect("second"), "int z; int b; int a2;");
        assert_eq!(rewrite.replacements_made(), 1);
    }
}
