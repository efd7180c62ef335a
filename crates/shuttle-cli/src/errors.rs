//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;

use shuttle_config::ConfigError;
use shuttle_symbols::SymbolError;
use shuttle_syntax::{QueryError, SyntaxError, TransformationError};
use thiserror::Error;

use crate::output::render_query_error;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{}", render_query_error(.pattern, .error))]
    InvalidQuery { pattern: String, error: QueryError },
    #[error("failed to parse {}", path.display())]
    ParseFailed { path: PathBuf },
    #[error("offset {offset} is past the end of the {length}-byte source")]
    OffsetOutOfRange { offset: usize, length: usize },
    #[error("transformation failed: {0}")]
    Transformation(#[from] TransformationError),
    #[error("failed to decode symbols from {}: {source}", path.display())]
    DecodeSymbols {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Symbols(#[from] SymbolError),
    #[error("failed to serialise output: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}
