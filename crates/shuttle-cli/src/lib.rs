//! Command-line interface runtime for the Shuttle toolchain.
//!
//! The module owns argument parsing, configuration validation, telemetry
//! set-up, and dispatch to the `query`, `transform`, `inspect` and `symbols`
//! commands. The runtime takes its output streams as parameters so it can be
//! exercised both from the binary entrypoint and from tests.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};

mod cli;
mod commands;
mod errors;
mod output;
pub mod telemetry;

pub use cli::{OutputFormat, ResolvedOutputFormat};

use cli::Cli;
use commands::CommandContext;
use errors::AppError;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_terminal_status(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns success when the command completed; any error is written to
/// `stderr` and turned into a failure exit code.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_io(args, &mut io)
}

pub(crate) fn run_with_io<I, W, E>(args: I, io: &mut IoStreams<'_, W, E>) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    match try_run(args, io) {
        Ok(()) => ExitCode::SUCCESS,
        // `--help` and `--version` arrive as clap errors meant for stdout.
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            write_line(io.stdout, &error.to_string());
            ExitCode::SUCCESS
        }
        Err(error) => {
            write_line(io.stderr, &error.to_string());
            ExitCode::FAILURE
        }
    }
}

fn try_run<I, W, E>(args: I, io: &mut IoStreams<'_, W, E>) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::CliUsage)?;
    cli.config.validate()?;
    telemetry::initialise(&cli.config)?;

    let format = cli.output.resolve(io.stdout_is_terminal());
    debug!(command = ?cli.command, ?format, "dispatching command");

    let mut context = CommandContext {
        stdout: &mut *io.stdout,
        stderr: &mut *io.stderr,
        format,
        config: &cli.config,
    };
    commands::execute(&cli.command, &mut context)
}

fn write_line<W: Write>(stream: &mut W, message: &str) {
    let line = message.trim_end();
    if let Err(error) = writeln!(stream, "{line}") {
        warn!(%error, "failed to write to output stream");
    }
}

#[cfg(test)]
mod tests;
