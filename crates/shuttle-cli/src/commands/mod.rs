//! Command implementations.
//!
//! Each command reads its input, drives the library crates, and hands a
//! report to [`crate::output::emit`]. Diagnostics such as match statistics
//! go to the error stream so the standard output stays pipeable.

mod inspect;
mod query;
mod symbols;
mod transform;

use std::fs;
use std::io::Write;
use std::path::Path;

use shuttle_config::Config;
use shuttle_syntax::{ParseResult, Parser, SupportedLanguage, SyntaxError};

use crate::cli::{CliCommand, ResolvedOutputFormat, SourceArgs};
use crate::errors::AppError;

/// Streams and settings shared by every command.
pub(crate) struct CommandContext<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    pub(crate) format: ResolvedOutputFormat,
    pub(crate) config: &'a Config,
}

/// Runs the selected subcommand.
pub(crate) fn execute<W, E>(
    command: &CliCommand,
    context: &mut CommandContext<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    match command {
        CliCommand::Query { query, source } => query::run(query, source, context),
        CliCommand::Transform {
            query,
            template,
            strict,
            source,
        } => transform::run(
            &transform::TransformArgs {
                query,
                template,
                strict: *strict,
            },
            source,
            context,
        ),
        CliCommand::Inspect {
            offset,
            all,
            source,
        } => inspect::run(*offset, *all, source, context),
        CliCommand::Symbols { file } => symbols::run(file, context),
    }
}

/// Reads a whole file as UTF-8.
fn read_input(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Picks the explicit language or detects it from the file extension.
fn resolve_language(source: &SourceArgs) -> Result<SupportedLanguage, AppError> {
    source
        .language
        .or_else(|| SupportedLanguage::from_path(&source.file))
        .ok_or_else(|| SyntaxError::unknown_language(source.file.clone()).into())
}

/// Reads and parses the file named by `source`.
fn parse_input(language: SupportedLanguage, source: &SourceArgs) -> Result<ParseResult, AppError> {
    let text = read_input(&source.file)?;
    let mut parser = Parser::new(language)?;
    parser.parse(text).ok_or_else(|| AppError::ParseFailed {
        path: source.file.clone(),
    })
}
