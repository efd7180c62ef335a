//! Error types for symbol retrieval and derivation.

use thiserror::Error;

/// Errors returned by symbol operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SymbolError {
    /// The symbol provider failed to produce the document's symbols.
    #[error("symbol provider failed: {message}")]
    Provider {
        /// Description of the failure.
        message: String,
    },

    /// A language server reported a kind outside the protocol's set.
    #[error("unknown symbol kind {kind} for '{name}'")]
    UnknownKind {
        /// Name of the offending symbol.
        name: String,
        /// The kind as the protocol type renders it, e.g. `SymbolKind(99)`.
        kind: String,
    },

    /// A function description could not be parsed as a signature.
    #[error("cannot parse signature '{description}': {reason}")]
    InvalidSignature {
        /// The description text that was rejected.
        description: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl SymbolError {
    /// Creates a provider error.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Creates an invalid signature error.
    #[must_use]
    pub fn invalid_signature(description: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSignature {
            description: description.into(),
            reason,
        }
    }
}
