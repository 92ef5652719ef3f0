//! emit: literal source.
//!
//! Produces one record per argument in order, appending a newline to any
//! argument that lacks one, then reports end of stream.

use crate::error::PipelineError;
use crate::op::{OpKind, Operator};
use crate::plan::is_op_token;
use crate::record::Record;

pub struct EmitSource {
    items: Vec<String>,
    next: usize,
}

impl EmitSource {
    pub fn new(items: Vec<String>) -> Self {
        EmitSource { items, next: 0 }
    }
}

/// Parse `emit STR [STR ...]`; at least one literal is required.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut j = i + 1;
    let start = j;
    while j < tokens.len() && !is_op_token(&tokens[j]) {
        j += 1;
    }
    if j == start {
        return Err(PipelineError::parse("emit: at least one string required"));
    }
    Ok((Box::new(EmitSource::new(tokens[start..j].to_vec())), j))
}

impl Operator for EmitSource {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn kind(&self) -> OpKind {
        OpKind::Source
    }

    fn produce(&mut self, record: &mut Record) -> Result<bool, PipelineError> {
        let Some(item) = self.items.get(self.next) else {
            return Ok(false);
        };
        self.next += 1;
        record.set_content(item.as_bytes());
        if record.as_bytes().last() != Some(&b'\n') {
            record.push(b'\n');
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_each_item_terminated() {
        let mut src = EmitSource::new(vec!["a".into(), "b\n".into(), "".into()]);
        let mut record = Record::new();
        let mut got = Vec::new();
        while src.produce(&mut record).unwrap() {
            got.push(record.as_bytes().to_vec());
        }
        assert_eq!(got, vec![b"a\n".to_vec(), b"b\n".to_vec(), b"\n".to_vec()]);
    }

    #[test]
    fn test_parse_requires_argument() {
        let tokens: Vec<String> = vec!["emit".to_string()];
        assert!(parse(&tokens, 0).is_err());
    }

    #[test]
    fn test_parse_stops_at_next_op() {
        let tokens: Vec<String> = ["emit", "x", "y", "take", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (_, next) = parse(&tokens, 0).unwrap();
        assert_eq!(next, 3);
    }
}
