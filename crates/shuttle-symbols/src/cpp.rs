//! Structured C++ views derived from document symbols.

use serde::Serialize;

use crate::range::TextRange;
use crate::symbol::Symbol;

/// A class or struct together with the symbols nested inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CppClass {
    /// Name of the class.
    pub name: String,
    /// Members in document order.
    pub members: Vec<Symbol>,
}

impl CppClass {
    /// Returns the member called `name`, if any.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Symbol> {
        self.members.iter().find(|member| member.name() == name)
    }
}

/// One parameter of a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Argument {
    /// Parameter type as written, e.g. `const std::string &`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Parameter name; empty when the signature omits it.
    pub name: String,
}

impl Argument {
    /// Creates an argument.
    #[must_use]
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A function or method with its signature split into parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CppFunction {
    /// Name of the function.
    pub name: String,
    /// Return type; empty for constructors.
    pub return_type: String,
    /// Parameters in declaration order.
    pub arguments: Vec<Argument>,
    /// Range of the whole function in the document.
    pub range: TextRange,
}

impl CppFunction {
    /// Returns the parameter types in order.
    pub fn argument_types(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|argument| argument.type_name.as_str())
    }
}
