//! Serialisable report models produced by the commands.

use serde::Serialize;
use shuttle_symbols::{CppClass, CppFunction};
use shuttle_syntax::inspect::{NodeSummary, QueryStats};
use shuttle_syntax::{ParseResult, QueryMatch, TextPosition};

use super::HumanReport;

/// All matches of one query over one file.
#[derive(Debug, Serialize)]
pub(crate) struct QueryReport {
    pub(crate) language: String,
    pub(crate) matches: Vec<MatchReport>,
    pub(crate) patterns: usize,
    pub(crate) captures: usize,
}

impl QueryReport {
    /// One-line statistics for the diagnostic stream.
    pub(crate) fn summary(&self) -> String {
        let stats = QueryStats {
            pattern_count: self.patterns,
            match_count: self.matches.len(),
            capture_count: self.captures,
        };
        format!("{stats}\n")
    }
}

impl HumanReport for QueryReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for found in &self.matches {
            for capture in &found.captures {
                out.push_str(&format!(
                    "{} {} {} {}..{} {}:{} {:?}\n",
                    found.pattern_index,
                    capture.name,
                    capture.kind,
                    capture.start_byte,
                    capture.end_byte,
                    capture.line,
                    capture.column,
                    capture.text
                ));
            }
        }
        out
    }
}

/// One match and its captures in capture order.
#[derive(Debug, Serialize)]
pub(crate) struct MatchReport {
    pub(crate) pattern_index: usize,
    pub(crate) captures: Vec<CaptureReport>,
}

impl From<&QueryMatch<'_, '_>> for MatchReport {
    fn from(found: &QueryMatch<'_, '_>) -> Self {
        let captures = found
            .captures()
            .iter()
            .map(|capture| {
                let range = capture.byte_range();
                let (line, column) = capture.start_position();
                CaptureReport {
                    name: capture.name().to_owned(),
                    kind: capture.kind(),
                    start_byte: range.start,
                    end_byte: range.end,
                    line,
                    column,
                    text: capture.text().to_owned(),
                }
            })
            .collect();
        Self {
            pattern_index: found.pattern_index(),
            captures,
        }
    }
}

/// A captured node. `line` and `column` are one-based.
#[derive(Debug, Serialize)]
pub(crate) struct CaptureReport {
    pub(crate) name: String,
    pub(crate) kind: &'static str,
    pub(crate) start_byte: usize,
    pub(crate) end_byte: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
    pub(crate) text: String,
}

/// Result of a transformation run.
#[derive(Debug, Serialize)]
pub(crate) struct TransformReport {
    pub(crate) output: String,
    pub(crate) replacements: usize,
}

impl TransformReport {
    /// One-line replacement count for the diagnostic stream.
    pub(crate) fn summary(&self) -> String {
        format!("{} replacements made\n", self.replacements)
    }
}

impl HumanReport for TransformReport {
    fn render_human(&self) -> String {
        self.output.clone()
    }
}

/// Serialisable mirror of a [`NodeSummary`] tree.
#[derive(Debug, Serialize)]
pub(crate) struct OutlineNode {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    named: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    error: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    missing: bool,
    start_byte: usize,
    end_byte: usize,
    start: TextPositionReport,
    end: TextPositionReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Self>,
}

impl From<&NodeSummary> for OutlineNode {
    fn from(summary: &NodeSummary) -> Self {
        Self {
            kind: summary.kind,
            field: summary.field_name,
            named: summary.is_named,
            error: summary.is_error,
            missing: summary.is_missing,
            start_byte: summary.byte_range.start,
            end_byte: summary.byte_range.end,
            start: summary.start.into(),
            end: summary.end.into(),
            children: summary.children.iter().map(Self::from).collect(),
        }
    }
}

/// A zero-based position.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct TextPositionReport {
    line: usize,
    column: usize,
}

impl From<TextPosition> for TextPositionReport {
    fn from(position: TextPosition) -> Self {
        Self {
            line: position.line,
            column: position.column,
        }
    }
}

/// The node under a byte offset and the kinds enclosing it.
#[derive(Debug, Serialize)]
pub(crate) struct NodeReport {
    kind: &'static str,
    start_byte: usize,
    end_byte: usize,
    start: TextPositionReport,
    end: TextPositionReport,
    text: String,
    ancestors: Vec<&'static str>,
}

impl NodeReport {
    pub(crate) fn new(parsed: &ParseResult, node: tree_sitter::Node<'_>) -> Self {
        let mut ancestors = Vec::new();
        let mut current = node.parent();
        while let Some(parent) = current {
            ancestors.push(parent.kind());
            current = parent.parent();
        }
        let range = node.byte_range();
        Self {
            kind: node.kind(),
            start_byte: range.start,
            end_byte: range.end,
            start: TextPosition::from(node.start_position()).into(),
            end: TextPosition::from(node.end_position()).into(),
            text: parsed.node_text(node).to_owned(),
            ancestors,
        }
    }
}

/// Output of the `inspect` command.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum InspectReport {
    /// The whole tree.
    Outline {
        #[serde(skip)]
        rendered: String,
        tree: OutlineNode,
    },
    /// A single node.
    Node(NodeReport),
}

impl InspectReport {
    pub(crate) fn outline(summary: &NodeSummary) -> Self {
        Self::Outline {
            rendered: summary.to_string(),
            tree: OutlineNode::from(summary),
        }
    }
}

impl HumanReport for InspectReport {
    fn render_human(&self) -> String {
        match self {
            Self::Outline { rendered, .. } => rendered.clone(),
            Self::Node(node) => {
                let mut out = format!(
                    "{} [{}, {}] - [{}, {}] {:?}\n",
                    node.kind,
                    node.start.line,
                    node.start.column,
                    node.end.line,
                    node.end.column,
                    node.text
                );
                if !node.ancestors.is_empty() {
                    out.push_str(&format!("  in {}\n", node.ancestors.join(" < ")));
                }
                out
            }
        }
    }
}

/// Classes and functions derived from a document's symbols.
#[derive(Debug, Serialize)]
pub(crate) struct SymbolsReport {
    pub(crate) classes: Vec<CppClass>,
    pub(crate) functions: Vec<CppFunction>,
}

impl HumanReport for SymbolsReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for class in &self.classes {
            out.push_str(&format!("class {}\n", class.name));
            for member in &class.members {
                out.push_str(&format!(
                    "  {} {} {}\n",
                    member.kind(),
                    member.name(),
                    member.range()
                ));
            }
        }
        for function in &self.functions {
            let arguments: Vec<String> = function
                .arguments
                .iter()
                .map(|argument| {
                    if argument.name.is_empty() {
                        argument.type_name.clone()
                    } else {
                        format!("{} {}", argument.type_name, argument.name)
                    }
                })
                .collect();
            out.push_str(&format!(
                "function {}({})",
                function.name,
                arguments.join(", ")
            ));
            if !function.return_type.is_empty() {
                out.push_str(&format!(" -> {}", function.return_type));
            }
            out.push('\n');
        }
        out
    }
}
