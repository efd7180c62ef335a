//! Document symbol model for the Shuttle toolchain.
//!
//! Language servers describe a document as a flat list of named, typed and
//! ranged symbols. This crate holds that list and derives structured views
//! from it:
//!
//! - [`Symbol::to_class`] gathers the members enclosed by a class or struct
//! - [`Symbol::to_function`] splits a function's description into a return
//!   type and [`Argument`]s
//! - [`SymbolCache`] fetches the list from a [`SymbolProvider`] once and
//!   serves it until it is cleared
//!
//! Conversions from `lsp_types` responses are provided so a saved
//! `textDocument/documentSymbol` reply can be used directly.
//!
//! # Example
//!
//! ```ignore
//! use shuttle_symbols::{Symbol, SymbolCache, SymbolError, SymbolKind, TextRange};
//!
//! let add = Symbol::new("add", SymbolKind::Function, TextRange::default())
//!     .with_description("int add(int a, int b)");
//! let mut cache = SymbolCache::new(move || Ok::<_, SymbolError>(vec![add.clone()]));
//!
//! for function in cache.functions()? {
//!     println!("{} -> {}", function.name, function.return_type);
//! }
//! ```

mod cache;
mod cpp;
mod document;
mod error;
mod kind;
mod provider;
mod range;
mod signature;
mod symbol;

pub use cache::SymbolCache;
pub use cpp::{Argument, CppClass, CppFunction};
pub use document::DocumentSymbols;
pub use error::SymbolError;
pub use kind::SymbolKind;
pub use provider::{StaticSymbols, SymbolProvider};
pub use range::{Position, TextRange};
pub use signature::Signature;
pub use symbol::Symbol;

#[cfg(test)]
mod tests;
