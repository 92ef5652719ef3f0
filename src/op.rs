//! Operator capability interface.
//!
//! Every pipeline stage implements [`Operator`] and declares one of four
//! kinds. The executor dispatches on the kind: sources get `produce`,
//! maps and filters get `consume`, a trailing sink gets `accept`. The
//! `init`/`flush`/`wants_stop` hooks are optional and default to no-ops.

use std::io::Write;

use crate::error::PipelineError;
use crate::record::Record;

/// Closed set of operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Originates records with no upstream input.
    Source,
    /// Rewrites the record in place, forwarding at most one per input.
    Map,
    /// Passes or drops a record without altering it.
    Filter,
    /// Terminal consumer; may request termination.
    Sink,
}

/// Verdict from a map or filter stage for the record in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Drop,
}

/// Result of delivering a record to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Record was written; keep streaming.
    Accepted,
    /// Record was written; the sink is now saturated.
    Final,
    /// Record was not written; the sink was already saturated.
    Full,
}

/// One pipeline stage. Configuration is fixed at parse time; mutable
/// progress (counters, open handles, traversal stacks) lives in the
/// operator instance and dies with its plan.
pub trait Operator {
    fn name(&self) -> &'static str;

    fn kind(&self) -> OpKind;

    /// One-time initializer, run for every operator before streaming.
    fn init(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Sources: refill `record` in place. `Ok(true)` means a record was
    /// produced, `Ok(false)` means this source is exhausted.
    fn produce(&mut self, _record: &mut Record) -> Result<bool, PipelineError> {
        Ok(false)
    }

    /// Maps and filters: inspect and possibly rewrite the record. The
    /// buffer may be reallocated; callers must not hold on to its bytes
    /// across this call.
    fn consume(&mut self, _record: &mut Record) -> Result<Verdict, PipelineError> {
        Ok(Verdict::Keep)
    }

    /// Sinks: take delivery of a surviving record.
    fn accept(
        &mut self,
        _record: &Record,
        _out: &mut dyn Write,
    ) -> Result<SinkState, PipelineError> {
        Ok(SinkState::Accepted)
    }

    /// End-of-stream hook, run for every operator when the loop ends.
    fn flush(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Early-stop query, checked after a stage keeps a record. A true
    /// answer ends the stream after the current record is delivered.
    fn wants_stop(&self) -> bool {
        false
    }
}
