//! A condition-tree rule engine.
//!
//! Rules pair a tree of `all`/`any` groups and comparison leaves with a list
//! of host actions. Leaves compare a variable, an arithmetic expression, or
//! a host function result against a value using a per-type operator table,
//! with three-valued outcomes so missing data reads as not applicable
//! rather than false. Every run produces an annotated audit tree.
//!
//! ```
//! use rulebook::{Actions, ActionSpec, Engine, Leaf, ResultShape, Rule, Variables};
//!
//! let variables = Variables::new().set("cart.total", 120_i64);
//! let actions = Actions::new().register("free_shipping", 0, |_| Ok(true.into()));
//! let engine = Engine::new(&variables, &actions);
//!
//! let rule = Rule::new(
//!     Leaf::variable("cart.total", "greater_than", 100_i64).into(),
//!     vec![ActionSpec::new("free_shipping", vec![])],
//! );
//! let outcome = engine.run(&rule, ResultShape::ActionResult).unwrap();
//! assert!(outcome.triggered());
//! ```

mod dispatch;
mod error;
mod evaluate;
mod expression;
mod invoke;
mod parse;
mod resolve;
mod types;
mod validate;

pub use dispatch::{compare, compare_as};
pub use error::RulebookError;
pub use parse::{parse as parse_expression, ParseError, MAX_NESTING};
pub use types::{
    rules_from_json, run_all, Accessors, ActionError, ActionProvider, ActionSpec, Actions,
    ArithOp, BoxError, ConditionNode, Engine, EvaluationNode, Expr, FieldType, InputKind, Leaf,
    Operator, OperatorError, RawValue, ResultShape, Rule, RunOptions, RunOutcome, RunOutput,
    StructuralError, Truth, TypedValue, VariableProvider, Variables, DEFAULT_MAX_DEPTH,
};
