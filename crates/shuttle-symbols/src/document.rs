//! Read-only view over one document's symbol list.

use crate::cpp::{CppClass, CppFunction};
use crate::range::Position;
use crate::symbol::Symbol;

/// The ordered symbol list of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSymbols {
    symbols: Vec<Symbol>,
}

impl DocumentSymbols {
    /// Wraps a symbol list in document order.
    #[must_use]
    pub const fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Returns the symbols as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterates over the symbols in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the document has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the first symbol called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name() == name)
    }

    /// Returns the innermost symbol whose range contains `position`.
    ///
    /// Ties go to the symbol listed last, which for a pre-order list is the
    /// most deeply nested one.
    #[must_use]
    pub fn symbol_at(&self, position: Position) -> Option<&Symbol> {
        self.symbols
            .iter()
            .filter(|symbol| symbol.range().contains(position))
            .reduce(|outer, inner| {
                if outer.range().contains_range(&inner.range()) {
                    inner
                } else {
                    outer
                }
            })
    }

    /// Derives every class and struct in the document.
    #[must_use]
    pub fn classes(&self) -> Vec<CppClass> {
        self.symbols
            .iter()
            .filter(|symbol| symbol.kind().is_class_like())
            .filter_map(|symbol| symbol.to_class(&self.symbols))
            .collect()
    }

    /// Derives every function, method, and constructor whose description
    /// parses as a signature.
    #[must_use]
    pub fn functions(&self) -> Vec<CppFunction> {
        self.symbols
            .iter()
            .filter(|symbol| symbol.kind().is_function_like())
            .filter_map(Symbol::to_function)
            .collect()
    }
}

impl<'a> IntoIterator for &'a DocumentSymbols {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Symbol>> for DocumentSymbols {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}
