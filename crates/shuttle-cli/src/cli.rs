//! CLI argument definitions for the Shuttle toolchain.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shuttle_config::Config;
use shuttle_syntax::SupportedLanguage;

/// Output format selection for command results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON documents.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable output.
    Human,
    /// JSON documents.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Syntax-aware search and rewrite over source files.
#[derive(Parser, Debug)]
#[command(name = "shuttle", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Controls how results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto, global = true)]
    pub(crate) output: OutputFormat,
    /// Logging and transformation settings.
    #[command(flatten)]
    pub(crate) config: Config,
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Grammar selection shared by the source-reading commands.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Grammar to parse with; detected from the file extension when omitted.
    #[arg(long, short = 'l')]
    pub(crate) language: Option<SupportedLanguage>,
    /// Source file to read.
    #[arg(value_name = "FILE")]
    pub(crate) file: PathBuf,
}

/// Subcommands of the `shuttle` binary.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Lists every match of a query.
    Query {
        /// Tree-sitter query pattern.
        #[arg(long, short = 'q')]
        query: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Rewrites the first match repeatedly until nothing matches.
    Transform {
        /// Tree-sitter query pattern.
        #[arg(long, short = 'q')]
        query: String,
        /// Replacement template; `${name}` inserts a capture, `$$` a dollar.
        #[arg(long, short = 't')]
        template: String,
        /// Refuses sources whose tree contains syntax errors.
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Prints the syntax tree, or the node at a byte offset.
    Inspect {
        /// Byte offset of the node to describe.
        #[arg(long)]
        offset: Option<usize>,
        /// Includes anonymous nodes such as punctuation in the outline.
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Derives classes and functions from a saved document symbol reply.
    Symbols {
        /// JSON file holding a `textDocument/documentSymbol` result.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
