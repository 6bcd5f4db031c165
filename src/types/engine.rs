use std::fmt;

use tracing::instrument;

use super::actions::ActionProvider;
use super::evaluation_node::EvaluationNode;
use super::outcome::RunOutcome;
use super::rule::{ActionSpec, ConditionNode, Rule};
use super::value::RawValue;
use super::variables::VariableProvider;
use crate::RulebookError;

/// Default limit on condition nesting, counting nested `value_condition`
/// rule lists as one extra level each.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What a single rule run returns when it triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultShape {
    /// The annotated condition tree.
    #[default]
    Audit,
    /// The first action's return value.
    ActionResult,
}

/// Options for [`Engine::run_all()`].
///
/// # Example
///
/// ```
/// use rulebook::RunOptions;
///
/// let options = RunOptions::new()
///     .stop_on_first_trigger(true)
///     .return_action_results(true);
/// assert!(options.stops_on_first_trigger());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    stop_on_first_trigger: bool,
    return_action_results: bool,
}

impl RunOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// End iteration at the first rule whose conditions hold.
    #[must_use]
    pub fn stop_on_first_trigger(mut self, stop: bool) -> Self {
        self.stop_on_first_trigger = stop;
        self
    }

    /// Return the first triggered rule's action result instead of the audit
    /// trees. Implies stopping at that rule.
    #[must_use]
    pub fn return_action_results(mut self, enabled: bool) -> Self {
        self.return_action_results = enabled;
        self
    }

    #[must_use]
    pub fn stops_on_first_trigger(&self) -> bool {
        self.stop_on_first_trigger
    }

    #[must_use]
    pub fn returns_action_results(&self) -> bool {
        self.return_action_results
    }

    pub(crate) fn shape(self) -> ResultShape {
        if self.return_action_results {
            ResultShape::ActionResult
        } else {
            ResultShape::Audit
        }
    }
}

/// Evaluates rules against a pair of host providers.
///
/// The engine borrows its providers and holds no mutable state. It is cheap
/// to build, so threads each create their own engine over providers shared
/// behind `Arc`.
///
/// # Example
///
/// ```
/// use rulebook::{Actions, ConditionNode, Engine, Leaf, Variables};
///
/// let variables = Variables::new().set("age", 21_i64);
/// let actions = Actions::new();
/// let engine = Engine::new(&variables, &actions);
///
/// let tree = ConditionNode::from(Leaf::variable("age", "greater_than_or_equal_to", 18_i64));
/// let (verdict, _) = engine.check_conditions(&tree).unwrap();
/// assert!(verdict);
/// ```
pub struct Engine<'a> {
    pub(crate) variables: &'a dyn VariableProvider,
    pub(crate) actions: &'a dyn ActionProvider,
    max_depth: usize,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(variables: &'a dyn VariableProvider, actions: &'a dyn ActionProvider) -> Self {
        Self {
            variables,
            actions,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit enforced before evaluation.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate a condition tree without running any rule actions.
    ///
    /// # Errors
    ///
    /// Structural and parse errors are reported before evaluation starts.
    /// Operator and action errors abort the walk.
    pub fn check_conditions(
        &self,
        node: &ConditionNode,
    ) -> Result<(bool, EvaluationNode), RulebookError> {
        crate::validate::check_tree(node, self.max_depth)?;
        crate::evaluate::eval_node(self, node)
    }

    /// Evaluate one rule and run its actions if it triggers.
    ///
    /// # Errors
    ///
    /// See [`check_conditions()`](Self::check_conditions).
    pub fn run(&self, rule: &Rule, shape: ResultShape) -> Result<RunOutcome, RulebookError> {
        crate::validate::check_tree(&rule.conditions, self.max_depth)?;
        crate::evaluate::run_rule(self, rule, shape)
    }

    /// Evaluate a rule list in order.
    ///
    /// Every rule is validated before the first one is evaluated.
    ///
    /// # Errors
    ///
    /// See [`check_conditions()`](Self::check_conditions).
    #[instrument(level = "debug", skip_all, fields(rules = rules.len()))]
    pub fn run_all(&self, rules: &[Rule], options: RunOptions) -> Result<RunOutcome, RulebookError> {
        crate::validate::check_rules(rules, self.max_depth)?;
        crate::evaluate::run_rules(self, rules, options)
    }

    /// Run an action list. Only the first action executes.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`](crate::ActionError) on undefined actions,
    /// arity mismatches, or host failures.
    pub fn do_actions(&self, actions: &[ActionSpec]) -> Result<RawValue, RulebookError> {
        crate::invoke::do_actions(self.variables, self.actions, actions)
    }

    /// Invoke a single host action with variable substitution on its
    /// string parameters.
    ///
    /// # Errors
    ///
    /// See [`do_actions()`](Self::do_actions).
    pub fn invoke(&self, name: &str, params: &[RawValue]) -> Result<RawValue, RulebookError> {
        crate::invoke::invoke(self.variables, self.actions, name, params)
    }

    /// Parse and evaluate an arithmetic expression.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::ParseError) for malformed input and
    /// [`ActionError`](crate::ActionError) when an arithmetic action fails.
    pub fn evaluate_expression(&self, source: &str) -> Result<RawValue, RulebookError> {
        let expr = crate::parse::parse(source)?;
        crate::expression::evaluate(self.variables, self.actions, &expr)
    }
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("actions", &self.actions.provider_name())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// One-shot form of [`Engine::run_all()`].
///
/// # Errors
///
/// See [`Engine::run_all()`].
pub fn run_all(
    rules: &[Rule],
    variables: &dyn VariableProvider,
    actions: &dyn ActionProvider,
    options: RunOptions,
) -> Result<RunOutcome, RulebookError> {
    Engine::new(variables, actions).run_all(rules, options)
}
