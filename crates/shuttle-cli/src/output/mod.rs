//! Rendering of command results for humans and for machines.
//!
//! Every command builds a serialisable report. JSON output is the report
//! itself; human output is produced by `HumanReport::render_human`.

mod models;

use std::io::Write;

use serde::Serialize;
use shuttle_syntax::QueryError;

pub(crate) use models::{
    InspectReport, MatchReport, NodeReport, QueryReport, SymbolsReport, TransformReport,
};

use crate::cli::ResolvedOutputFormat;
use crate::errors::AppError;

/// Reports that know how to render themselves for a terminal.
pub(crate) trait HumanReport {
    /// Renders the report as plain text, ending with a newline when non-empty.
    fn render_human(&self) -> String;
}

/// Writes `report` to `stdout` in the requested format.
pub(crate) fn emit<R, W>(
    report: &R,
    format: ResolvedOutputFormat,
    stdout: &mut W,
) -> Result<(), AppError>
where
    R: HumanReport + Serialize,
    W: Write,
{
    match format {
        ResolvedOutputFormat::Human => stdout.write_all(report.render_human().as_bytes())?,
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *stdout, report).map_err(AppError::Serialise)?;
            stdout.write_all(b"\n")?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Formats a query compilation error with the offending line and a caret
/// marker under the highlighted span.
pub(crate) fn render_query_error(pattern: &str, error: &QueryError) -> String {
    let span = error.highlight_span(pattern);
    let before = pattern.get(..span.start).unwrap_or_default();
    let line_start = before.rfind('\n').map_or(0, |index| index.saturating_add(1));
    let line_end = pattern
        .get(span.start..)
        .and_then(|rest| rest.find('\n'))
        .map_or(pattern.len(), |index| span.start.saturating_add(index));

    let line = pattern.get(line_start..line_end).unwrap_or_default();
    let indent = pattern
        .get(line_start..span.start)
        .map_or(0, |prefix| prefix.chars().count());
    let width = pattern
        .get(span)
        .map_or(1, |marked| marked.chars().count().max(1));

    format!(
        "{error}\n  {line}\n  {}{}",
        " ".repeat(indent),
        "^".repeat(width)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shuttle_syntax::{Query, SupportedLanguage};

    #[rstest]
    #[case(ResolvedOutputFormat::Human, "int y;\n")]
    #[case(
        ResolvedOutputFormat::Json,
        "{\n  \"output\": \"int y;\\n\",\n  \"replacements\": 1\n}\n"
    )]
    fn emit_honours_the_format(#[case] format: ResolvedOutputFormat, #[case] expected: &str) {
        let report = TransformReport {
            output: "int y;\n".to_owned(),
            replacements: 1,
        };
        let mut stdout = Vec::new();

        emit(&report, format, &mut stdout).expect("emit");

        assert_eq!(String::from_utf8(stdout).expect("utf8"), expected);
    }

    #[test]
    fn query_errors_point_at_the_offending_line() {
        let pattern = "(identifier) @id\n  (no_such_kind) @x";
        let error = Query::compile(SupportedLanguage::Cpp, pattern).expect_err("invalid");

        let rendered = render_query_error(pattern, &error);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.get(1), Some(&"    (no_such_kind) @x"));
        assert_eq!(lines.get(2), Some(&"     ^^^^^^^^^^^^"));
    }
}
