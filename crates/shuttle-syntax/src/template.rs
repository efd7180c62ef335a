//! Replacement templates for transformations.
//!
//! A template is plain text with `${name}` placeholders. Each placeholder is
//! replaced by the exact source text of the capture called `name` in the
//! current match. `$$` produces a literal `$`; a `$` followed by anything
//! else is kept as written.

use std::fmt;

use crate::error::TransformationError;
use crate::matcher::QueryMatch;
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `text` into a template.
    ///
    /// # Errors
    ///
    /// Returns [`TransformationError::InvalidTemplate`] for an unterminated
    /// placeholder, an empty placeholder, or a placeholder name containing
    /// characters a capture name cannot hold.
    pub fn parse(text: &str) -> Result<Self, TransformationError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            if ch != '$' {
                literal.push(ch);
                continue;
            }

            match chars.peek().map(|(_, next)| *next) {
                Some('$') => {
                    chars.next();
                    literal.push('$');
                }
                Some('{') => {
                    chars.next();
                    let name = read_placeholder(&mut chars, offset)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Capture(name));
                }
                _ => literal.push('$'),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: text.to_owned(),
            segments,
        })
    }

    /// Returns the template text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the capture names referenced by placeholders, in order of
    /// appearance. Repeated placeholders are repeated here.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Capture(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Checks that every placeholder names a capture `query` defines.
    ///
    /// # Errors
    ///
    /// Returns [`TransformationError::UnknownCapture`] for the first
    /// placeholder the query cannot bind.
    pub fn validate(&self, query: &Query) -> Result<(), TransformationError> {
        self.capture_names()
            .find(|name| !query.has_capture(name))
            .map_or(Ok(()), |name| {
                Err(TransformationError::UnknownCapture {
                    name: name.to_owned(),
                })
            })
    }

    /// Renders the template for one match.
    ///
    /// # Errors
    ///
    /// Returns [`TransformationError::UnboundCapture`] when a placeholder
    /// names a capture the match did not bind.
    pub fn render(&self, query_match: &QueryMatch<'_, '_>) -> Result<String, TransformationError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Capture(name) => {
                    let capture = query_match.capture(name).ok_or_else(|| {
                        TransformationError::UnboundCapture { name: name.clone() }
                    })?;
                    out.push_str(capture.text());
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

const fn is_capture_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Reads a placeholder name up to the closing `}`. `start` is the offset of
/// the `$` that opened it.
fn read_placeholder(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> Result<String, TransformationError> {
    let mut name = String::new();

    for (offset, ch) in chars.by_ref() {
        if ch == '}' {
            if name.is_empty() {
                return Err(TransformationError::invalid_template(
                    "empty placeholder",
                    start,
                ));
            }
            return Ok(name);
        }
        if !is_capture_name_char(ch) {
            return Err(TransformationError::invalid_template(
                format!("invalid character '{ch}' in placeholder"),
                offset,
            ));
        }
        name.push(ch);
    }

    Err(TransformationError::invalid_template(
        "unterminated placeholder",
        start,
    ))
}
