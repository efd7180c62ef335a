//! Symbol kinds reported by language servers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of a document symbol.
///
/// Mirrors the closed set of kinds in the Language Server Protocol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SymbolKind {
    /// A source file.
    File,
    /// A module.
    Module,
    /// A namespace.
    Namespace,
    /// A package.
    Package,
    /// A class.
    Class,
    /// A method on a class or struct.
    Method,
    /// A property.
    Property,
    /// A data member.
    Field,
    /// A constructor.
    Constructor,
    /// An enumeration.
    Enum,
    /// An interface.
    Interface,
    /// A free function.
    Function,
    /// A variable.
    Variable,
    /// A constant.
    Constant,
    /// A string literal.
    String,
    /// A number literal.
    Number,
    /// A boolean literal.
    Boolean,
    /// An array.
    Array,
    /// An object.
    Object,
    /// A key in a mapping.
    Key,
    /// A null value.
    Null,
    /// An enumerator.
    EnumMember,
    /// A struct.
    Struct,
    /// An event.
    Event,
    /// An operator overload.
    Operator,
    /// A template or generic type parameter.
    TypeParameter,
}

impl SymbolKind {
    /// Converts from the LSP kind. Returns `None` for values outside the
    /// protocol's closed set.
    #[must_use]
    pub const fn from_lsp(kind: lsp_types::SymbolKind) -> Option<Self> {
        let converted = match kind {
            lsp_types::SymbolKind::FILE => Self::File,
            lsp_types::SymbolKind::MODULE => Self::Module,
            lsp_types::SymbolKind::NAMESPACE => Self::Namespace,
            lsp_types::SymbolKind::PACKAGE => Self::Package,
            lsp_types::SymbolKind::CLASS => Self::Class,
            lsp_types::SymbolKind::METHOD => Self::Method,
            lsp_types::SymbolKind::PROPERTY => Self::Property,
            lsp_types::SymbolKind::FIELD => Self::Field,
            lsp_types::SymbolKind::CONSTRUCTOR => Self::Constructor,
            lsp_types::SymbolKind::ENUM => Self::Enum,
            lsp_types::SymbolKind::INTERFACE => Self::Interface,
            lsp_types::SymbolKind::FUNCTION => Self::Function,
            lsp_types::SymbolKind::VARIABLE => Self::Variable,
            lsp_types::SymbolKind::CONSTANT => Self::Constant,
            lsp_types::SymbolKind::STRING => Self::String,
            lsp_types::SymbolKind::NUMBER => Self::Number,
            lsp_types::SymbolKind::BOOLEAN => Self::Boolean,
            lsp_types::SymbolKind::ARRAY => Self::Array,
            lsp_types::SymbolKind::OBJECT => Self::Object,
            lsp_types::SymbolKind::KEY => Self::Key,
            lsp_types::SymbolKind::NULL => Self::Null,
            lsp_types::SymbolKind::ENUM_MEMBER => Self::EnumMember,
            lsp_types::SymbolKind::STRUCT => Self::Struct,
            lsp_types::SymbolKind::EVENT => Self::Event,
            lsp_types::SymbolKind::OPERATOR => Self::Operator,
            lsp_types::SymbolKind::TYPE_PARAMETER => Self::TypeParameter,
            _ => return None,
        };
        Some(converted)
    }

    /// Returns whether symbols of this kind can be viewed as a class.
    #[must_use]
    pub const fn is_class_like(self) -> bool {
        matches!(self, Self::Class | Self::Struct)
    }

    /// Returns whether symbols of this kind can be viewed as a function.
    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(self, Self::Method | Self::Function | Self::Constructor)
    }
}
