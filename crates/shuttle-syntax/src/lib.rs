//! Tree-sitter powered query and rewrite engine for the shuttle toolchain.
//!
//! This crate provides:
//!
//! - **Parsing** via [`Parser`], producing a [`ParseResult`] over an immutable
//!   [`SourceText`] snapshot
//! - **Query compilation** via [`Query::compile`], with [`QueryError`]
//!   offsets that index the pattern text
//! - **Match enumeration** via [`Matcher`], yielding [`QueryMatch`] values in
//!   traversal order
//! - **Iterative rewriting** via [`Transformation`], which reparses after
//!   every replacement and stops at a replacement cap
//! - **Inspection** helpers in [`inspect`] for tree outlines, node lookup,
//!   and query statistics
//!
//! # Supported Languages
//!
//! - C++ (`.cpp`, `.cc`, `.cxx`, `.c++`, `.h`, `.hh`, `.hpp`, `.hxx`)
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Query Language
//!
//! Queries use Tree-sitter S-expressions. Captures are written `@name` and
//! are referenced from transformation templates as `${name}`:
//!
//! ```
//! use shuttle_syntax::{Query, SupportedLanguage, Transformation};
//!
//! let query = Query::compile(
//!     SupportedLanguage::Cpp,
//!     r#"((identifier) @id (#eq? @id "foo"))"#,
//! )?;
//! let mut rewrite = Transformation::new("int foo;", query, "${id}_renamed")?;
//!
//! assert_eq!(rewrite.run()?, "int foo_renamed;");
//! assert_eq!(rewrite.replacements_made(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod inspect;
mod language;
mod matcher;
mod parser;
mod position;
mod query;
mod source;
mod template;
mod transformation;

pub use error::{QueryError, QueryErrorKind, SyntaxError, TransformationError};
pub use inspect::{NodeSummary, QueryStats};
pub use language::{LanguageParseError, SupportedLanguage};
pub use matcher::{CapturedNode, Matcher, Matches, QueryMatch};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use query::Query;
pub use source::{SourceText, TextPosition};
pub use template::Template;
pub use transformation::{DEFAULT_MAX_REPLACEMENTS, Transformation};

#[cfg(test)]
mod tests;
