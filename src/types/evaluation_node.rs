use std::fmt;

use serde::{Serialize, Serializer};

use super::value::RawValue;

/// Outcome of a single comparison.
///
/// `NotApplicable` is reported when an operand was missing. It is kept
/// distinct from `False` in audit output, and never satisfies a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    NotApplicable,
}

impl Truth {
    /// `true` only for [`Truth::True`].
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Truth::True
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl Serialize for Truth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Truth::True => serializer.serialize_bool(true),
            Truth::False => serializer.serialize_bool(false),
            Truth::NotApplicable => serializer.serialize_str("not_applicable"),
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => write!(f, "true"),
            Truth::False => write!(f, "false"),
            Truth::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Annotated result tree mirroring the evaluated condition tree.
///
/// Produced fresh by every evaluation for audit and explanation. Serializes
/// with a `"type"` tag of `all`, `any`, `condition` or `display`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationNode {
    All {
        children: Vec<EvaluationNode>,
        result: bool,
    },
    Any {
        children: Vec<EvaluationNode>,
        result: bool,
    },
    Condition {
        label: String,
        input: RawValue,
        comparison: String,
        result: Truth,
    },
    Display {
        label: String,
        threshold: RawValue,
    },
}

impl EvaluationNode {
    /// Whether this node counts as satisfied in an enclosing group.
    #[must_use]
    pub fn passed(&self) -> bool {
        match self {
            EvaluationNode::All { result, .. } | EvaluationNode::Any { result, .. } => *result,
            EvaluationNode::Condition { result, .. } => result.is_true(),
            EvaluationNode::Display { .. } => false,
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            EvaluationNode::All { children, result } | EvaluationNode::Any { children, result } => {
                let kind = if matches!(self, EvaluationNode::All { .. }) {
                    "all"
                } else {
                    "any"
                };
                writeln!(f, "{pad}{kind}: {result}")?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
            EvaluationNode::Condition {
                input,
                comparison,
                result,
                ..
            } => writeln!(f, "{pad}{comparison} (input {input}): {result}"),
            EvaluationNode::Display { label, threshold } => {
                writeln!(f, "{pad}{label}: {threshold}")
            }
        }
    }
}

impl fmt::Display for EvaluationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
