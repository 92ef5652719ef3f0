//! Default line source reading standard input.
//!
//! Inserted by the plan builder when the first parsed stage is not a
//! source. Not reachable from the operator registry. The line buffer is
//! the executor's record, so the source itself carries no hidden state
//! and the engine stays re-entrant.

use std::io;

use crate::error::PipelineError;
use crate::op::{OpKind, Operator};
use crate::record::Record;

use super::read_line;

pub struct StdinSource {
    stdin: io::Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        StdinSource { stdin: io::stdin() }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator for StdinSource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    fn kind(&self) -> OpKind {
        OpKind::Source
    }

    fn produce(&mut self, record: &mut Record) -> Result<bool, PipelineError> {
        read_line(&mut self.stdin.lock(), record)
    }
}
