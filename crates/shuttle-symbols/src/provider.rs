//! Sources of document symbols.

use lsp_types::DocumentSymbolResponse;

use crate::error::SymbolError;
use crate::symbol::Symbol;

/// Supplies the complete symbol list of one document.
///
/// Typically backed by a language server's `textDocument/documentSymbol`
/// request. Implementations are queried only when a [`crate::SymbolCache`]
/// is empty.
pub trait SymbolProvider {
    /// Fetches every symbol of the document in document order.
    ///
    /// # Errors
    /// Returns an error if the underlying source fails.
    fn document_symbols(&mut self) -> Result<Vec<Symbol>, SymbolError>;
}

impl<F> SymbolProvider for F
where
    F: FnMut() -> Result<Vec<Symbol>, SymbolError>,
{
    fn document_symbols(&mut self) -> Result<Vec<Symbol>, SymbolError> {
        self()
    }
}

/// Provider over a symbol list that is already in memory, such as one
/// decoded from a saved language server response.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbols {
    symbols: Vec<Symbol>,
}

impl StaticSymbols {
    /// Wraps an existing symbol list.
    #[must_use]
    pub const fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Builds the provider from a `textDocument/documentSymbol` response.
    ///
    /// # Errors
    /// Returns [`SymbolError::UnknownKind`] for a kind outside the protocol.
    pub fn from_response(response: &DocumentSymbolResponse) -> Result<Self, SymbolError> {
        Symbol::from_response(response).map(Self::new)
    }
}

impl SymbolProvider for StaticSymbols {
    fn document_symbols(&mut self) -> Result<Vec<Symbol>, SymbolError> {
        Ok(self.symbols.clone())
    }
}
