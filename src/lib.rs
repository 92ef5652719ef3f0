//! # fusepipe
//!
//! A fused, single-process rendition of the classic text-tool pipeline.
//! Instead of one process per tool joined by pipes, the operators run as
//! stages of a pull-based engine inside one process, passing a single
//! mutable record buffer from stage to stage.
//!
//! ## Overview
//!
//! A plan is parsed from a flat token stream and executed record by
//! record:
//! - **Sources** (`cat`, `emit`, `find`, or implicit stdin) fill the
//!   record buffer
//! - **Maps** (`cut`, `tr`) rewrite it in place
//! - **Filters** (`grep`) pass or drop it, and may request an early stop
//! - **Sinks** (`take`) write it out and may declare themselves full
//!
//! ## Example
//!
//! ```
//! use fusepipe::{Plan, RunStatus, run};
//!
//! let args: Vec<String> = ["emit", "alpha", "beta", "gamma", "grep", "a$"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let plan = Plan::parse(&args).unwrap();
//! let mut out = Vec::new();
//! let status = run(plan, &mut out).unwrap();
//!
//! assert_eq!(status, RunStatus::Matched);
//! assert_eq!(out, b"alpha\nbeta\ngamma\n");
//! ```

pub mod error;
pub mod executor;
pub mod fieldset;
pub mod matcher;
pub mod op;
pub mod ops;
pub mod plan;
pub mod record;
pub mod translit;

pub use error::PipelineError;
pub use executor::{RunStatus, run};
pub use op::{OpKind, Operator, SinkState, Verdict};
pub use plan::Plan;
pub use record::Record;
