//! CLI entrypoint for the Shuttle syntax-aware rewrite tool.
//!
//! The binary delegates to [`shuttle_cli::run`], which loads configuration,
//! processes command-line arguments, and runs the selected command.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    shuttle_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
