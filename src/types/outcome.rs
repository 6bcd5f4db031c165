use std::fmt;

use super::evaluation_node::EvaluationNode;
use super::value::RawValue;

/// What a run returns besides the triggered flag.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutput {
    /// Annotated trees of the evaluated rules, in rule order.
    Audit(Vec<EvaluationNode>),
    /// Result of the first action of the first triggered rule.
    ActionResult(RawValue),
}

/// Result of [`Engine::run()`](crate::Engine::run) and
/// [`Engine::run_all()`](crate::Engine::run_all).
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct RunOutcome {
    triggered: bool,
    output: RunOutput,
}

impl RunOutcome {
    pub(crate) fn new(triggered: bool, output: RunOutput) -> Self {
        Self { triggered, output }
    }

    /// Whether any rule's conditions were satisfied.
    #[must_use]
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    #[must_use]
    pub fn output(&self) -> &RunOutput {
        &self.output
    }

    /// The audit trees, if the run was asked for them (or nothing triggered).
    #[must_use]
    pub fn audit(&self) -> Option<&[EvaluationNode]> {
        match &self.output {
            RunOutput::Audit(nodes) => Some(nodes),
            RunOutput::ActionResult(_) => None,
        }
    }

    #[must_use]
    pub fn action_result(&self) -> Option<&RawValue> {
        match &self.output {
            RunOutput::ActionResult(value) => Some(value),
            RunOutput::Audit(_) => None,
        }
    }

    #[must_use]
    pub fn into_output(self) -> RunOutput {
        self.output
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "triggered: {}", self.triggered)?;
        match &self.output {
            RunOutput::Audit(nodes) => write!(f, ", audited rules: {}", nodes.len()),
            RunOutput::ActionResult(value) => write!(f, ", action result: {value}"),
        }
    }
}
