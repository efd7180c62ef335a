//! Query compilation for syntax-tree pattern matching.
//!
//! Patterns use the Tree-sitter S-expression query language:
//!
//! - `(identifier) @id` matches every `identifier` node and captures it as `id`
//! - `(declaration declarator: (identifier) @name)` constrains a field
//! - `((identifier) @x (#eq? @x "foo"))` filters with a text predicate
//! - `.` anchors children so they must be adjacent
//!
//! A compiled [`Query`] is immutable and may be reused against any number of
//! trees parsed with the same grammar.

use std::fmt;

use tracing::trace;

use crate::error::{QueryError, QueryErrorKind};
use crate::language::SupportedLanguage;

/// A compiled, immutable query.
pub struct Query {
    inner: tree_sitter::Query,
    source: String,
    language: SupportedLanguage,
}

impl Query {
    /// Compiles `pattern` against the grammar of `language`.
    ///
    /// Compilation is deterministic: the same grammar and pattern text always
    /// produce an equivalent query or an identical error.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] whose byte offset indexes `pattern` when the
    /// pattern has unbalanced delimiters, names an unknown node kind or field,
    /// uses an invalid capture, or is otherwise malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use shuttle_syntax::{Query, SupportedLanguage};
    ///
    /// let query = Query::compile(SupportedLanguage::Cpp, "(identifier) @id")?;
    /// assert_eq!(query.capture_names(), ["id"]);
    /// # Ok::<(), shuttle_syntax::QueryError>(())
    /// ```
    pub fn compile(language: SupportedLanguage, pattern: &str) -> Result<Self, QueryError> {
        check_delimiters(pattern)?;

        let inner = tree_sitter::Query::new(&language.tree_sitter_language(), pattern)
            .map_err(|error| from_tree_sitter_error(pattern, error))?;

        trace!(
            %language,
            patterns = inner.pattern_count(),
            captures = inner.capture_names().len(),
            "compiled query"
        );

        Ok(Self {
            inner,
            source: pattern.to_owned(),
            language,
        })
    }

    /// Returns the pattern text this query was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the grammar this query was compiled for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the number of top-level patterns in the query.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.inner.pattern_count()
    }

    /// Returns the capture names, indexed by capture id.
    #[must_use]
    pub fn capture_names(&self) -> &[&str] {
        self.inner.capture_names()
    }

    /// Returns whether the query defines a capture called `name`.
    #[must_use]
    pub fn has_capture(&self, name: &str) -> bool {
        self.inner.capture_index_for_name(name).is_some()
    }

    pub(crate) const fn inner(&self) -> &tree_sitter::Query {
        &self.inner
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("language", &self.language)
            .field("source", &self.source)
            .field("pattern_count", &self.pattern_count())
            .field("capture_names", &self.capture_names())
            .finish()
    }
}

fn from_tree_sitter_error(pattern: &str, error: tree_sitter::QueryError) -> QueryError {
    let kind = QueryErrorKind::from(error.kind);
    let description = match kind {
        QueryErrorKind::Syntax => "invalid syntax".to_owned(),
        QueryErrorKind::NodeType => format!("unknown node type '{}'", error.message),
        QueryErrorKind::Field => format!("unknown field '{}'", error.message),
        QueryErrorKind::Capture => format!("invalid capture '{}'", error.message),
        QueryErrorKind::Predicate => format!("invalid predicate: {}", error.message),
        QueryErrorKind::Structure => "impossible pattern structure".to_owned(),
        QueryErrorKind::Language => format!("incompatible grammar: {}", error.message),
    };
    QueryError::new(kind, description, pattern, error.offset)
}

/// Verifies that `(`/`)` and `[`/`]` pair up.
///
/// Tree-sitter reports an unclosed group where it gave up parsing, usually
/// the end of the text. Checking up front lets the error point at the
/// delimiter that was never closed instead.
fn check_delimiters(pattern: &str) -> Result<(), QueryError> {
    let mut open: Vec<(usize, char)> = Vec::new();
    let mut chars = pattern.char_indices();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => skip_string(&mut chars),
            ';' => skip_comment(&mut chars),
            '(' | '[' => open.push((offset, ch)),
            ')' | ']' => {
                let expected = if ch == ')' { '(' } else { '[' };
                match open.pop() {
                    Some((_, opener)) if opener == expected => {}
                    Some((opener_offset, opener)) => {
                        return Err(QueryError::new(
                            QueryErrorKind::Syntax,
                            format!("'{opener}' closed by '{ch}'"),
                            pattern,
                            opener_offset,
                        ));
                    }
                    None => {
                        return Err(QueryError::new(
                            QueryErrorKind::Syntax,
                            format!("unmatched '{ch}'"),
                            pattern,
                            offset,
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    open.first().map_or(Ok(()), |(offset, opener)| {
        Err(QueryError::new(
            QueryErrorKind::Syntax,
            format!("unclosed '{opener}'"),
            pattern,
            *offset,
        ))
    })
}

fn skip_string(chars: &mut std::str::CharIndices<'_>) {
    while let Some((_, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => return,
            _ => {}
        }
    }
}

fn skip_comment(chars: &mut std::str::CharIndices<'_>) {
    for (_, ch) in chars.by_ref() {
        if ch == '\n' {
            return;
        }
    }
}
