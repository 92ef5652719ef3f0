//! Pipeline error types.
//!
//! Two failure classes exist: plan-construction errors (bad options,
//! invalid patterns) reported before any record flows, and runtime I/O
//! errors that abort a stream in progress. Both map to an exit status
//! of at least 2; the distinction between "no output" (1) and success
//! (0) is carried by [`crate::executor::RunStatus`], not by errors.

use std::io;

use thiserror::Error;

/// Error produced while building or running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed option or argument in the token stream. Also covers
    /// invalid pattern syntax, which is likewise caught at parse time.
    #[error("parse error: {0}")]
    Parse(String),

    /// Open or read failure attributable to a specific path.
    #[error("{path}: {source}")]
    PathIo { path: String, source: io::Error },

    /// Read/write failure during streaming.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PipelineError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        PipelineError::Parse(msg.into())
    }

    pub(crate) fn path_io(path: impl Into<String>, source: io::Error) -> Self {
        PipelineError::PathIo {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error. Any pipeline error exits with
    /// at least 2; statuses 0 and 1 are reserved for clean runs.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl From<regex::Error> for PipelineError {
    fn from(e: regex::Error) -> Self {
        PipelineError::Parse(format!("invalid pattern: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display() {
        let e = PipelineError::parse("cut: missing -f LIST");
        assert_eq!(e.to_string(), "parse error: cut: missing -f LIST");
    }

    #[test]
    fn test_path_io_display() {
        let e = PipelineError::path_io(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(e.to_string().starts_with("missing.txt: "));
    }

    #[test]
    fn test_exit_codes_are_failures() {
        assert!(PipelineError::parse("x").exit_code() >= 2);
        assert!(PipelineError::from(io::Error::other("boom")).exit_code() >= 2);
    }

    #[test]
    fn test_regex_error_becomes_parse() {
        let err = regex::bytes::Regex::new("(").unwrap_err();
        let e: PipelineError = err.into();
        assert!(matches!(e, PipelineError::Parse(_)));
    }
}
