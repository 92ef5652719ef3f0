//! 1-based field selection bitset, parsed from cut-style `-f` lists.

use crate::error::PipelineError;

/// Open-ended ranges like `7-` are capped at this bound.
pub const OPEN_RANGE_CAP: usize = 4096;

/// Growable bitset over 1-based field positions.
///
/// Built once at parse time and immutable afterwards. `has(0)` is always
/// false, as is any position beyond the highest bit set while parsing.
#[derive(Debug, Clone)]
pub struct FieldSet {
    words: Vec<u64>,
}

impl FieldSet {
    /// Parse a comma-separated list of positive field numbers and ranges:
    /// `1`, `3-5`, `7-` (open end capped at [`OPEN_RANGE_CAP`]).
    pub fn parse(list: &str) -> Result<FieldSet, PipelineError> {
        let mut fs = FieldSet { words: Vec::new() };
        if list.is_empty() {
            return Err(PipelineError::parse("empty field list"));
        }
        for token in list.split(',') {
            let (lo, hi) = match token.split_once('-') {
                None => {
                    let n = parse_field(token)?;
                    (n, n)
                }
                Some((a, "")) => (parse_field(a)?, OPEN_RANGE_CAP),
                Some((a, b)) => {
                    let lo = parse_field(a)?;
                    let hi = parse_field(b)?;
                    if hi < lo {
                        return Err(PipelineError::parse(format!(
                            "decreasing field range '{token}'"
                        )));
                    }
                    (lo, hi)
                }
            };
            for idx in lo..=hi {
                fs.set(idx);
            }
        }
        Ok(fs)
    }

    fn set(&mut self, idx1: usize) {
        let bit = idx1 - 1;
        let word = bit / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (bit % 64);
    }

    /// Whether 1-based field `idx1` is selected.
    pub fn has(&self, idx1: usize) -> bool {
        if idx1 == 0 {
            return false;
        }
        let bit = idx1 - 1;
        match self.words.get(bit / 64) {
            Some(word) => word & (1u64 << (bit % 64)) != 0,
            None => false,
        }
    }
}

fn parse_field(s: &str) -> Result<usize, PipelineError> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(PipelineError::parse(format!("bad field number '{s}'"))),
    }
}
