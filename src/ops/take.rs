//! take: bounded sink.
//!
//! Accepts up to N records, writing each to the output immediately, and
//! requests termination once the Nth is written. Saturation is checked
//! before writing, so `take 0` emits nothing at all and the run reports
//! no output.

use std::io::Write;

use crate::error::PipelineError;
use crate::op::{OpKind, Operator, SinkState};
use crate::plan::is_op_token;
use crate::record::Record;

pub struct TakeSink {
    n: u64,
    seen: u64,
}

impl TakeSink {
    pub fn new(n: u64) -> Self {
        TakeSink { n, seen: 0 }
    }
}

/// Parse `take N` or `take -n N`; a negative count clamps to 0.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut j = i + 1;
    if tokens.get(j).is_some_and(|t| t.as_str() == "-n") {
        j += 1;
    }
    let value = match tokens.get(j) {
        Some(t) if !is_op_token(t) => t,
        _ => return Err(PipelineError::parse("take: missing count")),
    };
    let n: i64 = value
        .parse()
        .map_err(|_| PipelineError::parse(format!("take: bad count '{value}'")))?;
    j += 1;
    Ok((Box::new(TakeSink::new(n.max(0) as u64)), j))
}

impl Operator for TakeSink {
    fn name(&self) -> &'static str {
        "take"
    }

    fn kind(&self) -> OpKind {
        OpKind::Sink
    }

    fn accept(&mut self, record: &Record, out: &mut dyn Write) -> Result<SinkState, PipelineError> {
        if self.seen >= self.n {
            return Ok(SinkState::Full);
        }
        out.write_all(record.as_bytes())?;
        self.seen += 1;
        Ok(if self.seen >= self.n {
            SinkState::Final
        } else {
            SinkState::Accepted
        })
    }
}
