//! find: filesystem traversal source.
//!
//! Pre-order depth-first walk over an explicit stack of open-directory
//! frames, so native call depth is independent of filesystem depth.
//! Children are visited in directory-listing order; `.` and `..` never
//! appear (`fs::read_dir` excludes them). Symlinks are not followed.
//! A subdirectory that cannot be opened mid-walk is skipped silently —
//! the filesystem is only partially observable — but a start path that
//! cannot be stat'ed is a fatal error.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::op::{OpKind, Operator};
use crate::plan::is_op_token;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeFilter {
    File,
    Dir,
}

/// One stack entry: a directory being listed and its depth.
struct Frame {
    path: PathBuf,
    entries: ReadDir,
    depth: usize,
}

pub struct FindSource {
    start: PathBuf,
    type_filter: Option<TypeFilter>,
    name_glob: Option<glob::Pattern>,
    max_depth: Option<usize>,
    print0: bool,

    stack: Vec<Frame>,
    started: bool,
    done: bool,
}

impl FindSource {
    fn matches(&self, path: &Path, is_dir: bool, is_file: bool) -> bool {
        match self.type_filter {
            Some(TypeFilter::File) if !is_file => return false,
            Some(TypeFilter::Dir) if !is_dir => return false,
            _ => {}
        }
        if let Some(pat) = &self.name_glob {
            let base = match path.file_name() {
                Some(name) => name.to_string_lossy(),
                None => path.as_os_str().to_string_lossy(),
            };
            if !pat.matches(&base) {
                return false;
            }
        }
        true
    }

    fn emit(&self, record: &mut Record, path: &Path) {
        record.set_content(path.as_os_str().as_encoded_bytes());
        record.push(if self.print0 { b'\0' } else { b'\n' });
    }

    /// Push a frame listing `path`'s children, which sit at `depth + 1`.
    /// Skipped when the depth limit forbids emitting those children or
    /// the directory cannot be opened.
    fn descend(&mut self, path: &Path, depth: usize) {
        if self.max_depth.is_some_and(|m| depth >= m) {
            return;
        }
        if let Ok(entries) = fs::read_dir(path) {
            self.stack.push(Frame {
                path: path.to_path_buf(),
                entries,
                depth,
            });
        }
    }

    /// Handle the start path on the first pull. Returns true when the
    /// start path itself was emitted.
    fn start_node(&mut self, record: &mut Record) -> Result<bool, PipelineError> {
        let start = self.start.clone();
        let meta = fs::symlink_metadata(&start)
            .map_err(|e| PipelineError::path_io(start.to_string_lossy(), e))?;
        if meta.is_dir() {
            self.descend(&start, 0);
            if self.matches(&start, true, false) {
                self.emit(record, &start);
                return Ok(true);
            }
        } else {
            self.done = true;
            if self.matches(&start, false, meta.is_file()) {
                self.emit(record, &start);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Parse `find [START] [-type f|d] [-name GLOB] [-maxdepth N] [-print0]`.
pub(crate) fn parse(
    tokens: &[String],
    i: usize,
) -> Result<(Box<dyn Operator>, usize), PipelineError> {
    let mut start = PathBuf::from(".");
    let mut type_filter = None;
    let mut name_glob = None;
    let mut max_depth = None;
    let mut print0 = false;

    let mut j = i + 1;
    if let Some(tok) = tokens.get(j)
        && !tok.starts_with('-')
        && !is_op_token(tok)
    {
        start = PathBuf::from(tok);
        j += 1;
    }
    while j < tokens.len() {
        match tokens[j].as_str() {
            "-type" => {
                j += 1;
                type_filter = match tokens.get(j).map(|t| t.as_str()) {
                    Some("f") => Some(TypeFilter::File),
                    Some("d") => Some(TypeFilter::Dir),
                    other => {
                        return Err(PipelineError::parse(format!(
                            "find: -type expects f or d, got '{}'",
                            other.unwrap_or("")
                        )));
                    }
                };
            }
            "-name" => {
                j += 1;
                let pat = tokens
                    .get(j)
                    .ok_or_else(|| PipelineError::parse("find: -name requires a pattern"))?;
                name_glob = Some(
                    glob::Pattern::new(pat)
                        .map_err(|e| PipelineError::parse(format!("find: bad glob '{pat}': {e}")))?,
                );
            }
            "-maxdepth" => {
                j += 1;
                let value = tokens
                    .get(j)
                    .ok_or_else(|| PipelineError::parse("find: -maxdepth requires a number"))?;
                let depth: usize = value.parse().map_err(|_| {
                    PipelineError::parse(format!("find: bad depth '{value}'"))
                })?;
                max_depth = Some(depth);
            }
            "-print0" => print0 = true,
            _ => break,
        }
        j += 1;
    }

    Ok((
        Box::new(FindSource {
            start,
            type_filter,
            name_glob,
            max_depth,
            print0,
            stack: Vec::new(),
            started: false,
            done: false,
        }),
        j,
    ))
}

impl Operator for FindSource {
    fn name(&self) -> &'static str {
        "find"
    }

    fn kind(&self) -> OpKind {
        OpKind::Source
    }

    fn produce(&mut self, record: &mut Record) -> Result<bool, PipelineError> {
        if self.done {
            return Ok(false);
        }
        if !self.started {
            self.started = true;
            if self.start_node(record)? {
                return Ok(true);
            }
        }

        loop {
            let (child, child_depth) = {
                let Some(top) = self.stack.last_mut() else {
                    break;
                };
                match top.entries.next() {
                    None => {
                        self.stack.pop();
                        continue;
                    }
                    // Unreadable entry: the walk tolerates it.
                    Some(Err(_)) => continue,
                    Some(Ok(entry)) => (top.path.join(entry.file_name()), top.depth + 1),
                }
            };

            let Ok(meta) = fs::symlink_metadata(&child) else {
                continue;
            };
            let is_dir = meta.is_dir();
            let matched = self.matches(&child, is_dir, meta.is_file());
            if is_dir {
                self.descend(&child, child_depth);
            }
            if matched {
                self.emit(record, &child);
                return Ok(true);
            }
        }

        self.done = true;
        Ok(false)
    }
}
