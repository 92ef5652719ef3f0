//! Uniform match predicate over literal and regex patterns.
//!
//! Records are byte buffers with no UTF-8 guarantee, so the regex side
//! uses `regex::bytes`. The literal side is a plain substring scan with
//! optional ASCII case-folding; an empty needle matches everything.

use regex::bytes::{Regex, RegexBuilder};

use crate::error::PipelineError;

/// Compiled pattern: literal substring or regular expression.
///
/// Immutable once built; grep keeps its own running match count.
#[derive(Debug)]
pub enum PatternMatcher {
    Literal { needle: Vec<u8>, fold_case: bool },
    Regex(Regex),
}

impl PatternMatcher {
    pub fn literal(pattern: &str, fold_case: bool) -> Self {
        PatternMatcher::Literal {
            needle: pattern.as_bytes().to_vec(),
            fold_case,
        }
    }

    /// Compile a regular expression. Invalid syntax is a parse error,
    /// surfaced before any record is processed.
    pub fn regex(pattern: &str, fold_case: bool) -> Result<Self, PipelineError> {
        let rx = RegexBuilder::new(pattern)
            .case_insensitive(fold_case)
            .build()?;
        Ok(PatternMatcher::Regex(rx))
    }

    pub fn is_match(&self, haystack: &[u8]) -> bool {
        match self {
            PatternMatcher::Literal { needle, fold_case } => {
                find_literal(haystack, needle, *fold_case)
            }
            PatternMatcher::Regex(rx) => rx.is_match(haystack),
        }
    }
}

fn find_literal(haystack: &[u8], needle: &[u8], fold_case: bool) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    if fold_case {
        haystack
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle))
    } else {
        haystack.windows(needle.len()).any(|w| w == needle)
    }
}
