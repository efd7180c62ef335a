//! Lazily populated, explicitly invalidated symbol cache.

use tracing::debug;

use crate::cpp::{CppClass, CppFunction};
use crate::document::DocumentSymbols;
use crate::error::SymbolError;
use crate::provider::SymbolProvider;

#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Empty,
    Populated(DocumentSymbols),
}

/// Caches one document's symbol list.
///
/// The provider is queried on the first call to [`SymbolCache::symbols`] and
/// never again until [`SymbolCache::clear`] is called. The owner must clear
/// the cache whenever the document text changes.
#[derive(Debug)]
pub struct SymbolCache<P> {
    provider: P,
    state: CacheState,
}

impl<P: SymbolProvider> SymbolCache<P> {
    /// Creates an empty cache over `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            state: CacheState::Empty,
        }
    }

    /// Returns the document's symbols, fetching them if the cache is empty.
    ///
    /// # Errors
    /// Propagates provider failures. The cache stays empty in that case.
    pub fn symbols(&mut self) -> Result<&DocumentSymbols, SymbolError> {
        if matches!(self.state, CacheState::Empty) {
            let fetched = self.provider.document_symbols()?;
            debug!(count = fetched.len(), "symbol cache populated");
            self.state = CacheState::Populated(DocumentSymbols::new(fetched));
        }

        match &self.state {
            CacheState::Populated(symbols) => Ok(symbols),
            CacheState::Empty => Err(SymbolError::provider("symbol cache was not populated")),
        }
    }

    /// Derives the document's classes from the cached symbols.
    ///
    /// # Errors
    /// Propagates provider failures when the cache has to be populated.
    pub fn classes(&mut self) -> Result<Vec<CppClass>, SymbolError> {
        self.symbols().map(DocumentSymbols::classes)
    }

    /// Derives the document's functions from the cached symbols.
    ///
    /// # Errors
    /// Propagates provider failures when the cache has to be populated.
    pub fn functions(&mut self) -> Result<Vec<CppFunction>, SymbolError> {
        self.symbols().map(DocumentSymbols::functions)
    }
}

impl<P> SymbolCache<P> {
    /// Drops the cached symbols. The next request queries the provider.
    pub fn clear(&mut self) {
        if matches!(self.state, CacheState::Populated(_)) {
            debug!("symbol cache cleared");
        }
        self.state = CacheState::Empty;
    }

    /// Returns whether symbols are currently cached.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        matches!(self.state, CacheState::Populated(_))
    }

    /// Returns the provider, e.g. to reconfigure it between documents.
    pub const fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
