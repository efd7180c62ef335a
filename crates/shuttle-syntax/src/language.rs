//! Grammar handles and language detection.
//!
//! [`SupportedLanguage`] is the opaque grammar handle shared by the
//! [`Parser`](crate::Parser) and the [`Query`](crate::Query) compiler. Both
//! sides must be given the same handle or node kinds will not line up.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Grammars available to the query and transformation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// C and C++ sources and headers.
    #[default]
    Cpp,
    /// Rust source files (`.rs`).
    Rust,
    /// Python source files (`.py`).
    Python,
    /// TypeScript source files (`.ts`, `.tsx`).
    TypeScript,
}

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised. Plain `.h` headers
    /// are treated as C++.
    ///
    /// # Examples
    ///
    /// ```
    /// use shuttle_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("hpp"),
    ///     Some(SupportedLanguage::Cpp)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("json"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "cpp" | "cc" | "cxx" | "c++" | "h" | "hh" | "hpp" | "hxx" => Some(Self::Cpp),
            "rs" => Some(Self::Rust),
            "py" | "pyi" => Some(Self::Python),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            // TSX is a superset, so `.tsx` files parse as well.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cpp, Self::Rust, Self::Python, Self::TypeScript]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            "rust" | "rs" => Ok(Self::Rust),
            "python" | "py" => Ok(Self::Python),
            "typescript" | "ts" => Ok(Self::TypeScript),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cpp", SupportedLanguage::Cpp)]
    #[case("h", SupportedLanguage::Cpp)]
    #[case("HPP", SupportedLanguage::Cpp)]
    #[case("rs", SupportedLanguage::Rust)]
    #[case("pyi", SupportedLanguage::Python)]
    #[case("tsx", SupportedLanguage::TypeScript)]
    fn from_extension_recognises_supported_languages(
        #[case] ext: &str,
        #[case] expected: SupportedLanguage,
    ) {
        assert_eq!(SupportedLanguage::from_extension(ext), Some(expected));
    }

    #[rstest]
    #[case("json")]
    #[case("md")]
    #[case("")]
    fn from_extension_returns_none_for_unknown(#[case] ext: &str) {
        assert_eq!(SupportedLanguage::from_extension(ext), None);
    }

    #[rstest]
    #[case("src/widget.cpp", Some(SupportedLanguage::Cpp))]
    #[case("lib/main.rs", Some(SupportedLanguage::Rust))]
    #[case("Makefile", None)]
    fn from_path_uses_extension(
        #[case] path: &str,
        #[case] expected: Option<SupportedLanguage>,
    ) {
        assert_eq!(SupportedLanguage::from_path(Path::new(path)), expected);
    }

    #[rstest]
    #[case("C++", SupportedLanguage::Cpp)]
    #[case(" rust ", SupportedLanguage::Rust)]
    #[case("TYPESCRIPT", SupportedLanguage::TypeScript)]
    fn from_str_parses_language_names(#[case] input: &str, #[case] expected: SupportedLanguage) {
        assert_eq!(SupportedLanguage::from_str(input), Ok(expected));
    }

    #[test]
    fn from_str_reports_the_rejected_input() {
        let error = "Go".parse::<SupportedLanguage>().expect_err("go is unsupported");
        assert_eq!(error.input(), "go");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for language in SupportedLanguage::all() {
            assert_eq!(language.to_string().parse::<SupportedLanguage>(), Ok(*language));
        }
    }
}
