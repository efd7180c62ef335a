//! Parsing of free-text function signatures.
//!
//! Language servers describe functions with a single line of text such as
//! `int add(int a, int b)` or, from some servers, just `int (int, int)`.
//! [`Signature::parse`] splits that text into a return type and a list of
//! [`Argument`]s.
//!
//! The parser is deliberately shallow. It understands nesting of `()`,
//! `<>`, `[]` and `{}` well enough to split parameters at the right commas,
//! but it does not try to be a C++ declarator parser.

use crate::cpp::Argument;
use crate::error::SymbolError;

/// Storage qualifier dropped from the front of a description.
const STATIC_QUALIFIER: &str = "static ";

/// Builtin type keywords that can never be a parameter name.
const BUILTIN_TYPES: &[&str] = &[
    "void", "bool", "char", "wchar_t", "char8_t", "char16_t", "char32_t", "short", "int", "long",
    "float", "double", "signed", "unsigned", "auto",
];

/// Keywords that qualify a type but are not a type on their own.
const TYPE_QUALIFIERS: &[&str] = &[
    "const", "volatile", "struct", "class", "enum", "union", "typename",
];

/// A function signature split into return type and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Return type as written; empty for constructors and destructors.
    pub return_type: String,
    /// Parameters in declaration order.
    pub arguments: Vec<Argument>,
}

impl Signature {
    /// Parses `description` as the signature of `function_name`.
    ///
    /// Whitespace runs (including newlines) collapse to single spaces, and a
    /// leading `static` is dropped. Other specifiers such as `virtual` stay
    /// part of the return type. Everything after the `)` that closes the
    /// parameter list (e.g. `const`, `noexcept(true)`) is ignored. The function's own
    /// name, and any `Scope::` in front of it, is removed from the return
    /// type. Default argument values are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidSignature`] when the text has no
    /// parameter list or its parentheses do not balance.
    pub fn parse(function_name: &str, description: &str) -> Result<Self, SymbolError> {
        let normalised = description.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = normalised
            .strip_prefix(STATIC_QUALIFIER)
            .unwrap_or(normalised.as_str());

        let open = parameter_list_start(text, function_name)
            .ok_or_else(|| SymbolError::invalid_signature(description, "missing '('"))?;
        let after_open = text.get(open.saturating_add(1)..).unwrap_or_default();
        let close = matching_close(after_open).ok_or_else(|| {
            let reason = if after_open.contains(')') {
                "unbalanced parentheses"
            } else {
                "missing ')'"
            };
            SymbolError::invalid_signature(description, reason)
        })?;

        let parameters = after_open.get(..close).unwrap_or_default();

        let head = text.get(..open).unwrap_or_default();
        let return_type = strip_function_name(head, function_name);

        let fragments: Vec<&str> = split_top_level(parameters, ',')
            .into_iter()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect();
        let arguments = if fragments == ["void"] {
            Vec::new()
        } else {
            fragments.into_iter().map(parse_argument).collect()
        };

        Ok(Self {
            return_type: return_type.to_owned(),
            arguments,
        })
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds the `(` that opens the parameter list.
///
/// Prefers the `(` directly after the function's name so names such as
/// `operator()` work; falls back to the first `(`.
fn parameter_list_start(text: &str, function_name: &str) -> Option<usize> {
    if !function_name.is_empty() {
        let needle = format!("{function_name}(");
        let at_boundary = text.match_indices(&needle).find(|(index, _)| {
            text.get(..*index)
                .and_then(|before| before.chars().next_back())
                .is_none_or(|c| !is_identifier_char(c))
        });
        if let Some((index, _)) = at_boundary {
            return Some(index.saturating_add(function_name.len()));
        }
    }
    text.find('(')
}

/// Returns the index of the `)` that closes a list whose `(` precedes
/// `text`.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth: usize = 0;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth = depth.saturating_add(1),
            ')' if depth == 0 => return Some(index),
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Removes a trailing `function_name`, and any `Scope::` qualification in
/// front of it, from the text before the parameter list.
fn strip_function_name<'a>(head: &'a str, function_name: &str) -> &'a str {
    let trimmed = head.trim_end();
    let Some(without_name) = trimmed.strip_suffix(function_name) else {
        return trimmed;
    };
    let at_boundary = without_name
        .chars()
        .next_back()
        .is_none_or(|c| !is_identifier_char(c));
    if function_name.is_empty() || !at_boundary {
        return trimmed;
    }

    let mut rest = without_name.trim_end();
    while let Some(scope) = rest.strip_suffix("::") {
        let scope_start = scope
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace() || matches!(c, '*' | '&'))
            .map_or(0, |(index, c)| index.saturating_add(c.len_utf8()));
        rest = scope.get(..scope_start).unwrap_or_default().trim_end();
    }
    rest
}

/// Splits `text` at `separator` wherever no bracket is open.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match c {
            '(' | '<' | '[' | '{' => depth = depth.saturating_add(1),
            ')' | '>' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if c == separator && depth == 0 => {
                parts.push(text.get(start..index).unwrap_or_default());
                start = index.saturating_add(c.len_utf8());
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    parts
}

fn parse_argument(fragment: &str) -> Argument {
    let declaration = split_top_level(fragment, '=')
        .into_iter()
        .next()
        .unwrap_or(fragment)
        .trim();

    let (unsuffixed, array_suffix) = declaration
        .find('[')
        .filter(|_| declaration.ends_with(']'))
        .map_or((declaration, ""), |index| {
            (
                declaration.get(..index).unwrap_or(declaration),
                declaration.get(index..).unwrap_or_default(),
            )
        });
    let base = unsuffixed.trim_end();

    let name_start = base
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map_or(base.len(), |(index, _)| index);
    let candidate = base.get(name_start..).unwrap_or_default();
    let before = base.get(..name_start).unwrap_or_default();
    let type_part = before.trim_end();

    let follows_type = before
        .chars()
        .next_back()
        .is_some_and(|c| c == ' ' || c == '*' || c == '&');
    let is_name = follows_type
        && !type_part.is_empty()
        && candidate.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && !BUILTIN_TYPES.contains(&candidate)
        && !TYPE_QUALIFIERS.contains(&candidate)
        && !type_part
            .split(' ')
            .all(|word| TYPE_QUALIFIERS.contains(&word));

    if is_name {
        Argument::new(format!("{type_part}{array_suffix}"), candidate)
    } else {
        Argument::new(declaration, "")
    }
}
