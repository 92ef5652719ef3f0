//! Token stream to operator chain.
//!
//! A plan is built from the raw argument vector: each token that names a
//! registered operator starts a stage, and that operator's parser
//! consumes the tokens that belong to it. Stages keep their command-line
//! order. When the first stage is not a source, a stdin line source is
//! inserted in front, so `fx grep error take 5` reads standard input the
//! way a shell pipeline would.

use crate::error::PipelineError;
use crate::op::{OpKind, Operator};
use crate::ops::stdin::StdinSource;
use crate::ops::{cat, cut, emit, find, grep, take, tr};

type OpParser = fn(&[String], usize) -> Result<(Box<dyn Operator>, usize), PipelineError>;

/// Operator names and their parsers. Every operator answers to its
/// plain name and an `fx-` prefixed alias, so scripts can spell
/// `fx-grep` where a bare `grep` would be ambiguous.
const REGISTRY: &[(&str, OpParser)] = &[
    ("cat", cat::parse),
    ("cut", cut::parse),
    ("emit", emit::parse),
    ("find", find::parse),
    ("grep", grep::parse),
    ("take", take::parse),
    ("tr", tr::parse),
];

fn lookup(token: &str) -> Option<OpParser> {
    let name = token.strip_prefix("fx-").unwrap_or(token);
    REGISTRY
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, parser)| *parser)
}

/// True when `token` names a registered operator (either spelling).
/// Operator parsers use this to know where their own arguments end.
pub(crate) fn is_op_token(token: &str) -> bool {
    lookup(token).is_some()
}

pub struct Plan {
    pub(crate) ops: Vec<Box<dyn Operator>>,
}

impl Plan {
    /// Build a plan from the raw tokens. Fails on an unknown leading
    /// token, on a source outside the leading source run, or on a sink
    /// that is not last.
    pub fn parse(tokens: &[String]) -> Result<Plan, PipelineError> {
        let mut ops: Vec<Box<dyn Operator>> = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let Some(parser) = lookup(&tokens[i]) else {
                return Err(PipelineError::parse(format!(
                    "unknown operator '{}'",
                    tokens[i]
                )));
            };
            let (op, next) = parser(tokens, i)?;
            debug_assert!(next > i, "operator parser must consume its name token");
            ops.push(op);
            i = next;
        }

        if ops.is_empty() {
            return Err(PipelineError::parse("empty pipeline"));
        }
        if ops[0].kind() != OpKind::Source {
            ops.insert(0, Box::new(StdinSource::new()));
        }
        validate_shape(&ops)?;
        Ok(Plan { ops })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Sources form a contiguous run at the front of the chain (the
/// executor drains them in order) and a sink may only end it; the
/// stages between are maps and filters.
fn validate_shape(ops: &[Box<dyn Operator>]) -> Result<(), PipelineError> {
    let last = ops.len() - 1;
    let src_end = ops
        .iter()
        .take_while(|op| op.kind() == OpKind::Source)
        .count();
    for (idx, op) in ops.iter().enumerate().skip(src_end) {
        match op.kind() {
            OpKind::Source => {
                return Err(PipelineError::parse(format!(
                    "'{}' is a source and must be part of the leading source run",
                    op.name()
                )));
            }
            OpKind::Sink if idx < last => {
                return Err(PipelineError::parse(format!(
                    "'{}' is a sink and must come last",
                    op.name()
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stages_keep_order() {
        let plan = Plan::parse(&tokens(&["emit", "a", "grep", "a", "take", "1"])).unwrap();
        let names: Vec<&str> = plan.ops.iter().map(|op| op.name()).collect();
        assert_eq!(names, ["emit", "grep", "take"]);
    }

    #[test]
    fn test_default_stdin_source() {
        let plan = Plan::parse(&tokens(&["grep", "x"])).unwrap();
        assert_eq!(plan.ops[0].name(), "stdin");
        assert_eq!(plan.ops[0].kind(), OpKind::Source);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_fx_alias() {
        let plan = Plan::parse(&tokens(&["fx-emit", "a", "fx-take", "1"])).unwrap();
        let names: Vec<&str> = plan.ops.iter().map(|op| op.name()).collect();
        assert_eq!(names, ["emit", "take"]);
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            Plan::parse(&tokens(&["sort"])),
            Err(PipelineError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_pipeline() {
        assert!(Plan::parse(&[]).is_err());
    }

    #[test]
    fn test_source_prefix_may_chain() {
        let plan = Plan::parse(&tokens(&["emit", "a", "cat", "f.txt", "grep", "x"])).unwrap();
        let names: Vec<&str> = plan.ops.iter().map(|op| op.name()).collect();
        assert_eq!(names, ["emit", "cat", "grep"]);
    }

    #[test]
    fn test_source_after_stage_is_rejected() {
        assert!(Plan::parse(&tokens(&["grep", "x", "emit", "a"])).is_err());
        assert!(Plan::parse(&tokens(&["emit", "a", "grep", "x", "cat", "f"])).is_err());
    }

    #[test]
    fn test_sink_must_end() {
        assert!(Plan::parse(&tokens(&["take", "1", "grep", "x"])).is_err());
    }

    #[test]
    fn test_is_op_token() {
        assert!(is_op_token("grep"));
        assert!(is_op_token("fx-cut"));
        assert!(!is_op_token("pattern"));
        assert!(!is_op_token("fx-sort"));
    }
}
