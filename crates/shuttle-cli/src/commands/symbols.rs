//! `shuttle symbols`: derive classes and functions from saved symbols.

use std::io::Write;
use std::path::Path;

use lsp_types::DocumentSymbolResponse;
use shuttle_symbols::{StaticSymbols, SymbolCache};

use super::{CommandContext, read_input};
use crate::errors::AppError;
use crate::output::{SymbolsReport, emit};

pub(super) fn run<W, E>(path: &Path, context: &mut CommandContext<'_, W, E>) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let text = read_input(path)?;
    let response: DocumentSymbolResponse =
        serde_json::from_str(&text).map_err(|source| AppError::DecodeSymbols {
            path: path.to_path_buf(),
            source,
        })?;

    let mut cache = SymbolCache::new(StaticSymbols::from_response(&response)?);
    let report = SymbolsReport {
        classes: cache.classes()?,
        functions: cache.functions()?,
    };
    emit(&report, context.format, context.stdout)
}
