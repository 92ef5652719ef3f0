//! The seven built-in operators plus the default stdin source.
//!
//! Each module owns its config struct, its token parser, and its
//! `Operator` implementation; the parsers are wired up by the registry in
//! [`crate::plan`].

use std::io::BufRead;

use crate::error::PipelineError;
use crate::record::Record;

pub mod cat;
pub mod cut;
pub mod emit;
pub mod find;
pub mod grep;
pub mod stdin;
pub mod take;
pub mod tr;

/// Refill `record` with the next line (terminator included) from a
/// buffered reader. Returns false at end of input.
pub(crate) fn read_line<R: BufRead>(
    reader: &mut R,
    record: &mut Record,
) -> Result<bool, PipelineError> {
    record.clear();
    let n = reader.read_until(b'\n', record.buf_mut())?;
    Ok(n > 0)
}
