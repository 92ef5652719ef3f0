//! Pull-based pipeline executor.
//!
//! One record is in flight at a time: the active source fills the shared
//! record buffer, each intermediate stage mutates or drops it in place,
//! and the surviving record is handed to the sink (or written straight
//! to the output when the plan has no sink). The next record is not
//! pulled until the current one has fully settled. A plan may open with
//! several sources; when one is exhausted the executor advances to the
//! next, so `emit header cat data.txt` streams the header line first.
//!
//! Two stop signals end a run early. A filter may report `wants_stop`
//! after keeping a record; that record still travels the rest of the
//! chain, and the executor stops before pulling another. A sink may
//! report `Final` (this record written, no more wanted) or `Full`
//! (already saturated, record discarded).

use std::io::Write;

use crate::error::PipelineError;
use crate::op::{OpKind, Operator, SinkState, Verdict};
use crate::plan::Plan;
use crate::record::Record;

/// Outcome of a completed run, distinguished for the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one record reached the output.
    Matched,
    /// The run completed but nothing was emitted.
    NoOutput,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Matched => 0,
            RunStatus::NoOutput => 1,
        }
    }
}

/// Run a plan to completion against `out`.
///
/// Init hooks run front to back before any record moves; an init failure
/// aborts without flushing. Flush hooks run front to back after the
/// stream ends, even when the stream itself failed, and the first error
/// encountered (stream first, then flush) is the one reported.
pub fn run(plan: Plan, out: &mut dyn Write) -> Result<RunStatus, PipelineError> {
    let mut ops = plan.ops;
    for op in ops.iter_mut() {
        op.init()?;
    }

    let streamed = stream(&mut ops, out);

    let mut flush_err = None;
    for op in ops.iter_mut() {
        if let Err(e) = op.flush()
            && flush_err.is_none()
        {
            flush_err = Some(e);
        }
    }

    match (streamed, flush_err) {
        (Err(e), _) => Err(e),
        (Ok(_), Some(e)) => Err(e),
        (Ok(status), None) => Ok(status),
    }
}

fn stream(ops: &mut [Box<dyn Operator>], out: &mut dyn Write) -> Result<RunStatus, PipelineError> {
    let has_sink = ops.last().is_some_and(|op| op.kind() == OpKind::Sink);
    let chain_end = if has_sink { ops.len() - 1 } else { ops.len() };
    // Shape validation guarantees the sources are a contiguous prefix.
    let src_end = ops
        .iter()
        .take_while(|op| op.kind() == OpKind::Source)
        .count();

    let mut record = Record::new();
    let mut cur_src = 0;
    let mut emitted = false;
    'stream: loop {
        loop {
            if cur_src >= src_end {
                break 'stream;
            }
            if ops[cur_src].produce(&mut record)? {
                break;
            }
            // This source is drained; move on to the next one.
            cur_src += 1;
        }

        let mut dropped = false;
        for idx in src_end..chain_end {
            if ops[idx].consume(&mut record)? == Verdict::Drop {
                dropped = true;
                break;
            }
        }

        if !dropped {
            if has_sink {
                match ops[chain_end].accept(&record, out)? {
                    SinkState::Full => break,
                    SinkState::Final => {
                        emitted = true;
                        break;
                    }
                    SinkState::Accepted => emitted = true,
                }
            } else {
                out.write_all(record.as_bytes())?;
                emitted = true;
            }
        }

        if ops[src_end..chain_end].iter().any(|op| op.wants_stop()) {
            break;
        }
    }

    Ok(if emitted {
        RunStatus::Matched
    } else {
        RunStatus::NoOutput
    })
}
