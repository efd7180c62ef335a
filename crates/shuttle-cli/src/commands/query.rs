//! `shuttle query`: list every match of a pattern.

use std::io::Write;

use shuttle_syntax::Query;
use tracing::debug;

use super::{CommandContext, parse_input, resolve_language};
use crate::cli::SourceArgs;
use crate::errors::AppError;
use crate::output::{MatchReport, QueryReport, emit};

pub(super) fn run<W, E>(
    pattern: &str,
    source: &SourceArgs,
    context: &mut CommandContext<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let language = resolve_language(source)?;
    let query = Query::compile(language, pattern).map_err(|error| AppError::InvalidQuery {
        pattern: pattern.to_owned(),
        error,
    })?;
    let parsed = parse_input(language, source)?;

    let matches: Vec<MatchReport> = query
        .find_all(&parsed)
        .iter()
        .map(MatchReport::from)
        .collect();
    let captures = matches.iter().map(|found| found.captures.len()).sum();
    debug!(
        file = %source.file.display(),
        %language,
        matches = matches.len(),
        "query finished"
    );

    let report = QueryReport {
        language: language.to_string(),
        matches,
        patterns: query.pattern_count(),
        captures,
    };
    emit(&report, context.format, context.stdout)?;
    context.stderr.write_all(report.summary().as_bytes())?;
    Ok(())
}
