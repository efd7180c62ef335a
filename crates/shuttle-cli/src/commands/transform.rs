//! `shuttle transform`: rewrite a file until the pattern no longer matches.

use std::io::Write;

use shuttle_syntax::{Query, Transformation};

use super::{CommandContext, read_input, resolve_language};
use crate::cli::SourceArgs;
use crate::errors::AppError;
use crate::output::{TransformReport, emit};

/// Pattern, template and strictness of one rewrite.
pub(super) struct TransformArgs<'a> {
    pub(super) query: &'a str,
    pub(super) template: &'a str,
    pub(super) strict: bool,
}

pub(super) fn run<W, E>(
    args: &TransformArgs<'_>,
    source: &SourceArgs,
    context: &mut CommandContext<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let language = resolve_language(source)?;
    let query = Query::compile(language, args.query).map_err(|error| AppError::InvalidQuery {
        pattern: args.query.to_owned(),
        error,
    })?;
    let text = read_input(&source.file)?;

    let mut transformation = Transformation::new(text, query, args.template)?
        .with_max_replacements(context.config.max_replacements())
        .require_valid_syntax(args.strict);
    let output = transformation.run()?;

    let report = TransformReport {
        output,
        replacements: transformation.replacements_made(),
    };
    emit(&report, context.format, context.stdout)?;
    context.stderr.write_all(report.summary().as_bytes())?;
    Ok(())
}
