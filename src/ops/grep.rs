//! grep: pattern filter with a bounded early stop.
//!
//! Matches the record content (terminator excluded) against a literal or
//! regex pattern, XORs with `-v`, and passes or drops. With `-m N` the
//! record that reaches the bound is still delivered; the stop request
//! only takes effect for subsequent records.

use crate::error::PipelineError;
use crate::matcher::PatternMatcher;
use crate::op::{OpKind, Operator, Verdict};
use crate::plan::is_op_token;
use crate::record::Record;

pub struct GrepFilter {
    matcher: PatternMatcher,
    invert: bool,
    limit: Option<u64>,
    matched: u64,
}

impl GrepFilter {
    pub fn new(matcher: PatternMatcher, invert: bool, limit: Option<u64>) -> Self {
        GrepFilter {
            matcher,
            invert,
            limit,
            matched: 0,
        }
    }
}

/// Parse `grep [-E] [-F] [-i] [-v] [-m N] PATTERN`.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut fixed = false;
    let mut fold_case = false;
    let mut invert = false;
    let mut limit: Option<u64> = None;

    let mut j = i + 1;
    while j < tokens.len() && tokens[j].starts_with('-') {
        match tokens[j].as_str() {
            // Accepted for command-line compatibility; the regex
            // engine covers extended syntax either way.
            "-E" => {}
            "-F" => fixed = true,
            "-i" => fold_case = true,
            "-v" => invert = true,
            "-m" => {
                j += 1;
                let value = tokens
                    .get(j)
                    .ok_or_else(|| PipelineError::parse("grep: -m requires a count"))?;
                let n: u64 = value
                    .parse()
                    .map_err(|_| PipelineError::parse(format!("grep: bad count '{value}'")))?;
                // 0 disables the bound, matching an unset -m.
                limit = if n > 0 { Some(n) } else { None };
            }
            _ => break,
        }
        j += 1;
    }

    let pattern = match tokens.get(j) {
        Some(t) if !is_op_token(t) => t,
        _ => return Err(PipelineError::parse("grep: missing pattern")),
    };
    j += 1;

    let matcher = if fixed {
        PatternMatcher::literal(pattern, fold_case)
    } else {
        PatternMatcher::regex(pattern, fold_case)?
    };
    Ok((Box::new(GrepFilter::new(matcher, invert, limit)), j))
}

impl Operator for GrepFilter {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn kind(&self) -> OpKind {
        OpKind::Filter
    }

    fn consume(&mut self, record: &mut Record) -> Result<Verdict, PipelineError> {
        let mut hit = self.matcher.is_match(record.content());
        if self.invert {
            hit = !hit;
        }
        if hit {
            if self.limit.is_some() {
                self.matched += 1;
            }
            Ok(Verdict::Keep)
        } else {
            Ok(Verdict::Drop)
        }
    }

    fn wants_stop(&self) -> bool {
        self.limit.is_some_and(|n| self.matched >= n)
    }
}
