//! `shuttle inspect`: show the syntax tree or the node at an offset.

use std::io::Write;

use shuttle_syntax::inspect::{node_at_offset, outline};

use super::{CommandContext, parse_input, resolve_language};
use crate::cli::SourceArgs;
use crate::errors::AppError;
use crate::output::{InspectReport, NodeReport, emit};

pub(super) fn run<W, E>(
    offset: Option<usize>,
    include_anonymous: bool,
    source: &SourceArgs,
    context: &mut CommandContext<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let language = resolve_language(source)?;
    let parsed = parse_input(language, source)?;

    let report = match offset {
        Some(byte_offset) => {
            let node = node_at_offset(&parsed, byte_offset).ok_or_else(|| {
                AppError::OffsetOutOfRange {
                    offset: byte_offset,
                    length: parsed.source().len(),
                }
            })?;
            InspectReport::Node(NodeReport::new(&parsed, node))
        }
        None => InspectReport::outline(&outline(&parsed, !include_anonymous)),
    };
    emit(&report, context.format, context.stdout)
}
