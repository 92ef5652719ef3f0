//! cat: multi-file line source.
//!
//! Reads lines sequentially from each path in argument order; end of
//! file on one path transparently advances to the next. `-` (and an
//! empty path list) means standard input. An unopenable path is fatal
//! for the whole run, unlike find's tolerance of unreadable
//! subdirectories mid-walk.

use std::fs::File;
use std::io::{self, BufReader};

use crate::error::PipelineError;
use crate::op::{OpKind, Operator};
use crate::plan::is_op_token;
use crate::record::Record;

use super::read_line;

enum Input {
    Stdin(io::Stdin),
    File(BufReader<File>),
}

pub struct CatSource {
    paths: Vec<String>,
    next: usize,
    current: Option<Input>,
}

impl CatSource {
    pub fn new(paths: Vec<String>) -> Self {
        let paths = if paths.is_empty() {
            vec!["-".to_string()]
        } else {
            paths
        };
        CatSource {
            paths,
            next: 0,
            current: None,
        }
    }

    /// Open the next path in line. Returns false when all paths are done.
    fn open_next(&mut self) -> Result<bool, PipelineError> {
        if self.next >= self.paths.len() {
            return Ok(false);
        }
        let path = &self.paths[self.next];
        self.next += 1;
        self.current = Some(if path == "-" {
            Input::Stdin(io::stdin())
        } else {
            let file = File::open(path).map_err(|e| PipelineError::path_io(path, e))?;
            Input::File(BufReader::new(file))
        });
        Ok(true)
    }
}

/// Parse `cat [PATH ...]`; path collection stops at the next operator token.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut j = i + 1;
    let start = j;
    while j < tokens.len() && !is_op_token(&tokens[j]) {
        j += 1;
    }
    let paths = tokens[start..j].to_vec();
    Ok((Box::new(CatSource::new(paths)), j))
}

impl Operator for CatSource {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn kind(&self) -> OpKind {
        OpKind::Source
    }

    fn produce(&mut self, record: &mut Record) -> Result<bool, PipelineError> {
        loop {
            if self.current.is_none() && !self.open_next()? {
                return Ok(false);
            }
            let got = match self.current.as_mut() {
                Some(Input::Stdin(stdin)) => read_line(&mut stdin.lock(), record)?,
                Some(Input::File(reader)) => read_line(reader, record)?,
                None => false,
            };
            if got {
                return Ok(true);
            }
            // This path is exhausted; fall through to the next one.
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn produce_all(src: &mut CatSource) -> Vec<Vec<u8>> {
        let mut record = Record::new();
        let mut out = Vec::new();
        while src.produce(&mut record).unwrap() {
            out.push(record.as_bytes().to_vec());
        }
        out
    }

    #[test]
    fn test_reads_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "one\ntwo\n").unwrap();
        std::fs::write(&b, "three\n").unwrap();

        let mut src = CatSource::new(vec![
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ]);
        let lines = produce_all(&mut src);
        assert_eq!(lines, vec![b"one\n".to_vec(), b"two\n".to_vec(), b"three\n".to_vec()]);
    }

    #[test]
    fn test_final_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("f.txt");
        let mut f = std::fs::File::create(&p).unwrap();
        f.write_all(b"last").unwrap();

        let mut src = CatSource::new(vec![p.to_string_lossy().into_owned()]);
        let lines = produce_all(&mut src);
        assert_eq!(lines, vec![b"last".to_vec()]);
    }

    #[test]
    fn test_unopenable_path_is_fatal() {
        let mut src = CatSource::new(vec!["definitely/not/here.txt".to_string()]);
        let mut record = Record::new();
        let err = src.produce(&mut record).unwrap_err();
        assert!(matches!(err, PipelineError::PathIo { .. }));
    }

    #[test]
    fn test_empty_path_list_defaults_to_stdin() {
        let src = CatSource::new(Vec::new());
        assert_eq!(src.paths, vec!["-".to_string()]);
    }

    #[test]
    fn test_parse_stops_at_next_op() {
        let tokens: Vec<String> = ["cat", "a.txt", "b.txt", "grep", "x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (op, next) = parse(&tokens, 0).unwrap();
        assert_eq!(op.name(), "cat");
        assert_eq!(next, 3);
    }
}
