//! Error types for parsing, query compilation, and transformations.
//!
//! Compile-time problems with the pattern text ([`QueryError`]) and runtime
//! failures of a rewrite ([`TransformationError`]) are deliberately separate
//! types so callers can render them differently.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;
use crate::position::offset_to_one_based;

/// Errors from setting up syntactic analysis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The file extension is not supported for syntactic analysis.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// The extension that was not recognised.
        extension: String,
    },

    /// Failed to determine language from file path.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The path that could not be mapped to a language.
        path: PathBuf,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates an unsupported extension error.
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }
}

/// Category of a query compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    /// Malformed pattern syntax, including unbalanced delimiters.
    Syntax,
    /// A node kind the grammar does not define.
    NodeType,
    /// A field name the grammar does not define.
    Field,
    /// An invalid or undefined capture name.
    Capture,
    /// A malformed predicate.
    Predicate,
    /// A structurally impossible pattern.
    Structure,
    /// The grammar is incompatible with the query engine.
    Language,
}

impl QueryErrorKind {
    /// Returns a short lower-case label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::NodeType => "node type",
            Self::Field => "field",
            Self::Capture => "capture",
            Self::Predicate => "predicate",
            Self::Structure => "structure",
            Self::Language => "language",
        }
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tree_sitter::QueryErrorKind> for QueryErrorKind {
    fn from(kind: tree_sitter::QueryErrorKind) -> Self {
        match kind {
            tree_sitter::QueryErrorKind::Syntax => Self::Syntax,
            tree_sitter::QueryErrorKind::NodeType => Self::NodeType,
            tree_sitter::QueryErrorKind::Field => Self::Field,
            tree_sitter::QueryErrorKind::Capture => Self::Capture,
            tree_sitter::QueryErrorKind::Predicate => Self::Predicate,
            tree_sitter::QueryErrorKind::Structure => Self::Structure,
            tree_sitter::QueryErrorKind::Language => Self::Language,
        }
    }
}

/// A pattern that could not be compiled.
///
/// The byte offset always indexes the pattern text, so editors can place an
/// inline marker on the offending token (see [`QueryError::highlight_span`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error in query at {line}:{column}: {description}")]
pub struct QueryError {
    kind: QueryErrorKind,
    description: String,
    byte_offset: usize,
    line: u32,
    column: u32,
}

impl QueryError {
    /// Creates a query error at `byte_offset` within `pattern`.
    ///
    /// The one-based line and column are derived from the pattern text.
    #[must_use]
    pub fn new(
        kind: QueryErrorKind,
        description: impl Into<String>,
        pattern: &str,
        byte_offset: usize,
    ) -> Self {
        let (line, column) = offset_to_one_based(pattern, byte_offset);
        Self {
            kind,
            description: description.into(),
            byte_offset,
            line,
            column,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the byte offset into the pattern text.
    #[must_use]
    pub const fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the one-based line of the error within the pattern.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-based column (in bytes) of the error within the pattern.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the byte range of `pattern` an editor should underline.
    ///
    /// The compiler only reports where an error starts, so the span is
    /// extended to the end of the word at the offset and is never empty. An
    /// offset at the very end of the text is moved back onto the last
    /// character so it remains visible.
    #[must_use]
    pub fn highlight_span(&self, pattern: &str) -> std::ops::Range<usize> {
        if pattern.is_empty() {
            return 0..0;
        }

        let mut start = self.byte_offset.min(pattern.len());
        if start == pattern.len() {
            start = pattern
                .char_indices()
                .next_back()
                .map_or(0, |(index, _)| index);
        }
        while !pattern.is_char_boundary(start) {
            start = start.saturating_sub(1);
        }

        let tail = pattern.get(start..).unwrap_or_default();
        let word_len: usize = tail
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        let len = if word_len == 0 {
            tail.chars().next().map_or(0, char::len_utf8)
        } else {
            word_len
        };

        start..start.saturating_add(len)
    }
}

/// Runtime failure of a [`Transformation`](crate::Transformation).
///
/// A failed run never hands back partially rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransformationError {
    /// The current text could not be parsed.
    #[error("failed to parse: {message}")]
    Parse {
        /// Description of the failure.
        message: String,
    },

    /// The template names a capture the query does not define.
    #[error("template references unknown capture '{name}'")]
    UnknownCapture {
        /// The capture name used in the template.
        name: String,
    },

    /// The template names a capture that the current match left unbound.
    #[error("capture '{name}' is not bound in the current match")]
    UnboundCapture {
        /// The capture name used in the template.
        name: String,
    },

    /// The template text is malformed.
    #[error("invalid template at byte {offset}: {message}")]
    InvalidTemplate {
        /// Description of the template problem.
        message: String,
        /// Byte offset into the template text.
        offset: usize,
    },

    /// The replacement cap was reached; the rewrite probably regenerates
    /// text that matches its own pattern.
    #[error("exceeded max replacements ({limit})")]
    MaxReplacementsExceeded {
        /// The configured cap.
        limit: usize,
    },

    /// A match carried no captures, so there is no span to replace.
    #[error("match for pattern {pattern_index} has no captures to replace")]
    UncapturedMatch {
        /// Index of the pattern that matched.
        pattern_index: usize,
    },

    /// A match span did not fall on UTF-8 character boundaries.
    #[error("replacement range {start}..{end} is not on a UTF-8 boundary")]
    InvalidRange {
        /// Start byte of the span.
        start: usize,
        /// End byte of the span.
        end: usize,
    },
}

impl TransformationError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an invalid template error.
    #[must_use]
    pub fn invalid_template(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidTemplate {
            message: message.into(),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(identifier", 0, 1, 1)]
    #[case("(identifier", 11, 1, 12)]
    #[case("(a)\n(b", 4, 2, 1)]
    #[case("(a)\n  (b", 6, 2, 3)]
    fn query_error_derives_one_based_position(
        #[case] pattern: &str,
        #[case] offset: usize,
        #[case] line: u32,
        #[case] column: u32,
    ) {
        let error = QueryError::new(QueryErrorKind::Syntax, "boom", pattern, offset);
        assert_eq!((error.line(), error.column()), (line, column));
    }

    #[rstest]
    #[case("(identifier @id", 0, 0..1)]
    #[case("(not_a_node) @x", 1, 1..11)]
    #[case("(identifier)", 12, 11..12)]
    #[case("", 0, 0..0)]
    fn highlight_span_covers_the_offending_word(
        #[case] pattern: &str,
        #[case] offset: usize,
        #[case] expected: std::ops::Range<usize>,
    ) {
        let error = QueryError::new(QueryErrorKind::Syntax, "boom", pattern, offset);
        assert_eq!(error.highlight_span(pattern), expected);
    }

    #[test]
    fn transformation_errors_render_readable_messages() {
        assert_eq!(
            TransformationError::MaxReplacementsExceeded { limit: 100 }.to_string(),
            "exceeded max replacements (100)"
        );
        assert_eq!(
            TransformationError::parse("no tree").to_string(),
            "failed to parse: no tree"
        );
    }
}
