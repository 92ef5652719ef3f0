//! tr: byte transliteration stage.
//!
//! Thin operator shell over [`TranslitTable`]; all the set parsing and
//! the in-place pass live there.

use crate::error::PipelineError;
use crate::op::{OpKind, Operator, Verdict};
use crate::plan::is_op_token;
use crate::record::Record;
use crate::translit::TranslitTable;

pub struct TrMap {
    table: TranslitTable,
}

/// Parse `tr [-d] [-s] SET1 [SET2]`.
///
/// SET2 is only consumed in translate mode and only when the next token
/// is not a registered operator name; `tr -d SET1` leaves any following
/// token for the next stage.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut delete = false;
    let mut squeeze = false;

    let mut j = i + 1;
    while j < tokens.len() && tokens[j].starts_with('-') {
        if is_op_token(&tokens[j]) {
            break;
        }
        match tokens[j].as_str() {
            "-d" => delete = true,
            "-s" => squeeze = true,
            _ => break,
        }
        j += 1;
    }

    let set1 = tokens
        .get(j)
        .ok_or_else(|| PipelineError::parse("tr: missing SET1"))?;
    j += 1;

    let set2 = if !delete && j < tokens.len() && !is_op_token(&tokens[j]) {
        let s = tokens[j].as_str();
        j += 1;
        Some(s)
    } else {
        None
    };

    let table = TranslitTable::build(set1, set2, delete, squeeze).map_err(prefix_tr)?;
    Ok((Box::new(TrMap { table }), j))
}

fn prefix_tr(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::Parse(msg) => PipelineError::Parse(format!("tr: {msg}")),
        other => other,
    }
}

impl Operator for TrMap {
    fn name(&self) -> &'static str {
        "tr"
    }

    fn kind(&self) -> OpKind {
        OpKind::Map
    }

    fn consume(&mut self, record: &mut Record) -> Result<Verdict, PipelineError> {
        self.table.apply(record);
        Ok(Verdict::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr_tokens(tokens: &[&str]) -> (Box<dyn Operator>, usize) {
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        parse(&tokens, 0).unwrap()
    }

    fn run(op: &mut Box<dyn Operator>, input: &[u8]) -> Vec<u8> {
        let mut r = Record::from_bytes(input);
        op.consume(&mut r).unwrap();
        r.as_bytes().to_vec()
    }

    #[test]
    fn test_translate() {
        let (mut op, _) = tr_tokens(&["tr", "abc", "xyz"]);
        assert_eq!(run(&mut op, b"cab\n"), b"zxy\n");
    }

    #[test]
    fn test_delete() {
        let (mut op, _) = tr_tokens(&["tr", "-d", "aeiou"]);
        assert_eq!(run(&mut op, b"banana\n"), b"bnn\n");
    }

    #[test]
    fn test_squeeze_only() {
        let (mut op, _) = tr_tokens(&["tr", "-s", "l"]);
        assert_eq!(run(&mut op, b"hello\n"), b"helo\n");
    }

    #[test]
    fn test_delete_does_not_consume_set2() {
        let tokens: Vec<String> = ["tr", "-d", "x", "grep", "y"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (_, next) = parse(&tokens, 0).unwrap();
        assert_eq!(next, 3);
    }

    #[test]
    fn test_set2_stops_at_op_token() {
        let tokens: Vec<String> = ["tr", "-s", "l", "take", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (_, next) = parse(&tokens, 0).unwrap();
        assert_eq!(next, 3);
    }

    #[test]
    fn test_missing_set1_is_error() {
        let tokens: Vec<String> = vec!["tr".to_string(), "-d".to_string()];
        assert!(parse(&tokens, 0).is_err());
    }
}
