mod actions;
mod engine;
mod error;
mod evaluation_node;
mod expr;
mod operator;
mod outcome;
mod rule;
mod typed_value;
mod value;
mod variables;

pub use actions::{ActionProvider, Actions};
pub use engine::{run_all, Engine, ResultShape, RunOptions, DEFAULT_MAX_DEPTH};
pub use error::{ActionError, BoxError, OperatorError, StructuralError};
pub use evaluation_node::{EvaluationNode, Truth};
pub use expr::{ArithOp, Expr};
pub use operator::{FieldType, InputKind, Operator};
pub use outcome::{RunOutcome, RunOutput};
pub use rule::{rules_from_json, ActionSpec, ConditionNode, Leaf, Rule};
pub use typed_value::TypedValue;
pub use value::RawValue;
pub use variables::{Accessors, VariableProvider, Variables};
