//! cut: in-place field projection.
//!
//! Splits each record on a single delimiter byte (default tab), keeps the
//! fields selected by the `-f` bitset, and rewrites the record as those
//! fields joined by the output delimiter, preserving a trailing
//! terminator. The joined output is assembled in an operator-owned
//! scratch buffer before being written back: with an output delimiter
//! longer than the input delimiter the write position can overtake the
//! read position, so a straight overlapping copy would corrupt unread
//! source bytes.

use crate::error::PipelineError;
use crate::fieldset::FieldSet;
use crate::op::{OpKind, Operator, Verdict};
use crate::plan::is_op_token;
use crate::record::Record;

pub struct CutMap {
    delim: u8,
    fields: FieldSet,
    out_delim: Vec<u8>,
    suppress_no_delim: bool,
    scratch: Vec<u8>,
}

impl CutMap {
    pub fn new(delim: u8, fields: FieldSet, out_delim: Vec<u8>, suppress_no_delim: bool) -> Self {
        CutMap {
            delim,
            fields,
            out_delim,
            suppress_no_delim,
            scratch: Vec::new(),
        }
    }
}

/// Parse `cut -d C -f LIST [-s] [--output-delimiter=STR]`.
///
/// `-dC` and `-fLIST` attached forms are accepted. The scan stops at the
/// first token that is a registered operator name or not an option.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut delim = b'\t';
    let mut fields: Option<FieldSet> = None;
    let mut out_delim: Option<Vec<u8>> = None;
    let mut suppress = false;

    let mut j = i + 1;
    while j < tokens.len() {
        let arg = tokens[j].as_str();
        if is_op_token(arg) || !arg.starts_with('-') {
            break;
        }
        if arg == "-d" {
            j += 1;
            delim = delim_arg(tokens.get(j).map(|t| t.as_str()))?;
        } else if arg == "-f" {
            j += 1;
            let list = tokens
                .get(j)
                .ok_or_else(|| PipelineError::parse("cut: -f requires a field list"))?;
            fields = Some(FieldSet::parse(list).map_err(prefix_cut)?);
        } else if arg == "-s" {
            suppress = true;
        } else if let Some(value) = arg.strip_prefix("--output-delimiter=") {
            out_delim = Some(value.as_bytes().to_vec());
        } else if let Some(rest) = arg.strip_prefix("-d") {
            delim = delim_arg(Some(rest))?;
        } else if let Some(rest) = arg.strip_prefix("-f") {
            fields = Some(FieldSet::parse(rest).map_err(prefix_cut)?);
        } else {
            break;
        }
        j += 1;
    }

    let fields = fields.ok_or_else(|| PipelineError::parse("cut: missing -f LIST"))?;
    let out_delim = out_delim.unwrap_or_else(|| vec![delim]);
    Ok((Box::new(CutMap::new(delim, fields, out_delim, suppress)), j))
}

fn delim_arg(token: Option<&str>) -> Result<u8, PipelineError> {
    match token.map(|t| t.as_bytes()) {
        Some([first, ..]) => Ok(*first),
        _ => Err(PipelineError::parse("cut: -d requires a delimiter byte")),
    }
}

fn prefix_cut(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::Parse(msg) => PipelineError::Parse(format!("cut: {msg}")),
        other => other,
    }
}

impl Operator for CutMap {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn kind(&self) -> OpKind {
        OpKind::Map
    }

    fn consume(&mut self, record: &mut Record) -> Result<Verdict, PipelineError> {
        let terminator = record.terminator();
        let content_len = record.content().len();
        if content_len == 0 {
            return Ok(Verdict::Keep);
        }

        let bytes = record.as_bytes();
        self.scratch.clear();
        let mut saw_delim = false;
        let mut first_out = true;
        let mut field_no = 1;
        let mut pos = 0;
        loop {
            let start = pos;
            while pos < content_len && bytes[pos] != self.delim {
                pos += 1;
            }
            if self.fields.has(field_no) {
                if !first_out {
                    self.scratch.extend_from_slice(&self.out_delim);
                }
                self.scratch.extend_from_slice(&bytes[start..pos]);
                first_out = false;
            }
            if pos < content_len {
                saw_delim = true;
                pos += 1;
                field_no += 1;
            } else {
                break;
            }
        }

        if !saw_delim {
            // A delimiter-less record is either suppressed or passed
            // through whole, regardless of the field selection.
            return if self.suppress_no_delim {
                Ok(Verdict::Drop)
            } else {
                Ok(Verdict::Keep)
            };
        }

        if let Some(t) = terminator {
            self.scratch.push(t);
        }
        record.set_content(&self.scratch);
        Ok(Verdict::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut_tokens(tokens: &[&str]) -> Result<(Box<dyn Operator>, usize), PipelineError> {
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        parse(&tokens, 0)
    }

    fn run(op: &mut Box<dyn Operator>, input: &[u8]) -> (Verdict, Vec<u8>) {
        let mut r = Record::from_bytes(input);
        let v = op.consume(&mut r).unwrap();
        (v, r.as_bytes().to_vec())
    }

    #[test]
    fn test_select_fields() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f1,3"]).unwrap();
        assert_eq!(run(&mut op, b"1,2,3\n"), (Verdict::Keep, b"1,3\n".to_vec()));
        assert_eq!(run(&mut op, b"4,5,6\n"), (Verdict::Keep, b"4,6\n".to_vec()));
    }

    #[test]
    fn test_default_tab_delimiter() {
        let (mut op, _) = cut_tokens(&["cut", "-f2"]).unwrap();
        assert_eq!(run(&mut op, b"a\tb\tc\n"), (Verdict::Keep, b"b\n".to_vec()));
    }

    #[test]
    fn test_open_range() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f2-"]).unwrap();
        assert_eq!(
            run(&mut op, b"a,b,c,d\n"),
            (Verdict::Keep, b"b,c,d\n".to_vec())
        );
    }

    #[test]
    fn test_no_delimiter_passes_through() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f2"]).unwrap();
        assert_eq!(
            run(&mut op, b"no delims here\n"),
            (Verdict::Keep, b"no delims here\n".to_vec())
        );
    }

    #[test]
    fn test_no_delimiter_suppressed() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f2", "-s"]).unwrap();
        assert_eq!(run(&mut op, b"no delims here\n").0, Verdict::Drop);
        assert_eq!(run(&mut op, b"a,b\n"), (Verdict::Keep, b"b\n".to_vec()));
    }

    #[test]
    fn test_empty_record_passes() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f1", "-s"]).unwrap();
        assert_eq!(run(&mut op, b"\n"), (Verdict::Keep, b"\n".to_vec()));
    }

    #[test]
    fn test_trailing_delimiter_yields_empty_field() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f1,3"]).unwrap();
        assert_eq!(run(&mut op, b"a,b,\n"), (Verdict::Keep, b"a,\n".to_vec()));
    }

    #[test]
    fn test_output_delimiter_longer_than_input() {
        let (mut op, _) =
            cut_tokens(&["cut", "-d,", "-f1,2,3", "--output-delimiter=::"]).unwrap();
        let (v, out) = run(&mut op, b"a,b,c\n");
        assert_eq!(v, Verdict::Keep);
        assert_eq!(out, b"a::b::c\n".to_vec());
        // length = fields + (count-1) * delim + terminator
        assert_eq!(out.len(), 3 + 2 * 2 + 1);
    }

    #[test]
    fn test_unselected_line_keeps_terminator_only() {
        let (mut op, _) = cut_tokens(&["cut", "-d,", "-f5"]).unwrap();
        assert_eq!(run(&mut op, b"a,b\n"), (Verdict::Keep, b"\n".to_vec()));
    }

    #[test]
    fn test_attached_option_forms() {
        let (mut separate, _) = cut_tokens(&["cut", "-d", ":", "-f", "2"]).unwrap();
        let (mut attached, _) = cut_tokens(&["cut", "-d:", "-f2"]).unwrap();
        assert_eq!(run(&mut separate, b"x:y\n"), run(&mut attached, b"x:y\n"));
        assert_eq!(run(&mut attached, b"x:y\n").1, b"y\n".to_vec());
    }

    #[test]
    fn test_missing_fields_is_error() {
        assert!(cut_tokens(&["cut", "-d,"]).is_err());
        assert!(cut_tokens(&["cut"]).is_err());
    }

    #[test]
    fn test_parse_stops_at_next_op() {
        let tokens: Vec<String> = ["cut", "-f1", "grep", "x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (_, next) = parse(&tokens, 0).unwrap();
        assert_eq!(next, 2);
    }
}
