//! Document symbols and the structured views derived from them.

use lsp_types::{DocumentSymbol, DocumentSymbolResponse, SymbolInformation};
use serde::Serialize;
use tracing::warn;

use crate::cpp::{CppClass, CppFunction};
use crate::error::SymbolError;
use crate::kind::SymbolKind;
use crate::range::TextRange;
use crate::signature::Signature;

/// A named, typed, ranged entry from a document's symbol list.
///
/// Symbols are immutable values handed over by a language server. A symbol
/// with an empty name is the null symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    name: String,
    description: String,
    kind: SymbolKind,
    range: TextRange,
    selection_range: TextRange,
}

impl Symbol {
    /// Creates a symbol whose selection range equals its range.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: TextRange) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            range,
            selection_range: range,
        }
    }

    /// Sets the free-text description, e.g. a function signature.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the range to select when the symbol is picked.
    #[must_use]
    pub const fn with_selection_range(mut self, selection_range: TextRange) -> Self {
        self.selection_range = selection_range;
        self
    }

    /// Returns the symbol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description; empty when the server supplied none.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the symbol kind.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the range enclosing the whole symbol.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Returns the range to reveal when the symbol is picked.
    #[must_use]
    pub const fn selection_range(&self) -> TextRange {
        self.selection_range
    }

    /// Returns whether this is the null symbol.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.name.is_empty()
    }

    /// Views a class or struct symbol as a [`CppClass`].
    ///
    /// Members are every symbol in `document_symbols` whose range lies inside
    /// this symbol's range and whose name differs, in document order.
    /// Returns `None`, and logs a warning, for any other kind.
    #[must_use]
    pub fn to_class(&self, document_symbols: &[Self]) -> Option<CppClass> {
        if !self.kind.is_class_like() {
            warn!(
                symbol = %self.name,
                kind = %self.kind,
                "symbol should be a class or struct"
            );
            return None;
        }

        let members = document_symbols
            .iter()
            .filter(|symbol| self.range.contains_range(&symbol.range) && symbol.name != self.name)
            .cloned()
            .collect();

        Some(CppClass {
            name: self.name.clone(),
            members,
        })
    }

    /// Views a function, method, or constructor symbol as a [`CppFunction`]
    /// by parsing its description.
    ///
    /// Returns `None`, and logs a warning, for any other kind or when the
    /// description is not a parsable signature.
    #[must_use]
    pub fn to_function(&self) -> Option<CppFunction> {
        if !self.kind.is_function_like() {
            warn!(
                symbol = %self.name,
                kind = %self.kind,
                "symbol should be either a method or a function"
            );
            return None;
        }

        match Signature::parse(&self.name, &self.description) {
            Ok(signature) => Some(CppFunction {
                name: self.name.clone(),
                return_type: signature.return_type,
                arguments: signature.arguments,
                range: self.range,
            }),
            Err(error) => {
                warn!(symbol = %self.name, %error, "ignoring function symbol");
                None
            }
        }
    }

    /// Converts a (possibly nested) LSP document symbol tree into a flat
    /// list in pre-order. The LSP `detail` becomes the description.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::UnknownKind`] for a kind outside the protocol.
    pub fn flatten_document_symbols(symbols: &[DocumentSymbol]) -> Result<Vec<Self>, SymbolError> {
        let mut flat = Vec::new();
        for symbol in symbols {
            push_document_symbol(symbol, &mut flat)?;
        }
        Ok(flat)
    }

    /// Converts a flat `SymbolInformation` list.
    ///
    /// Such entries carry no description and no separate selection range.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::UnknownKind`] for a kind outside the protocol.
    pub fn from_symbol_information(
        symbols: &[SymbolInformation],
    ) -> Result<Vec<Self>, SymbolError> {
        symbols
            .iter()
            .map(|info| {
                let kind = convert_kind(&info.name, info.kind)?;
                Ok(Self::new(info.name.clone(), kind, info.location.range.into()))
            })
            .collect()
    }

    /// Converts either shape of a `textDocument/documentSymbol` response.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::UnknownKind`] for a kind outside the protocol.
    pub fn from_response(response: &DocumentSymbolResponse) -> Result<Vec<Self>, SymbolError> {
        match response {
            DocumentSymbolResponse::Flat(symbols) => Self::from_symbol_information(symbols),
            DocumentSymbolResponse::Nested(symbols) => Self::flatten_document_symbols(symbols),
        }
    }
}

fn convert_kind(name: &str, kind: lsp_types::SymbolKind) -> Result<SymbolKind, SymbolError> {
    SymbolKind::from_lsp(kind).ok_or_else(|| SymbolError::UnknownKind {
        name: name.to_owned(),
        kind: format!("{kind:?}"),
    })
}

fn push_document_symbol(symbol: &DocumentSymbol, flat: &mut Vec<Symbol>) -> Result<(), SymbolError> {
    let kind = convert_kind(&symbol.name, symbol.kind)?;
    flat.push(
        Symbol::new(symbol.name.clone(), kind, symbol.range.into())
            .with_description(symbol.detail.clone().unwrap_or_default())
            .with_selection_range(symbol.selection_range.into()),
    );
    for child in symbol.children.iter().flatten() {
        push_document_symbol(child, flat)?;
    }
    Ok(())
}
