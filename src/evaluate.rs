use tracing::{debug, trace};

use crate::invoke::{do_actions, invoke};
use crate::parse::parse;
use crate::resolve::resolve;
use crate::{
    ConditionNode, Engine, EvaluationNode, InputKind, Leaf, Operator, RawValue, ResultShape,
    Rule, RulebookError, RunOptions, RunOutcome, RunOutput, StructuralError, TypedValue,
};

/// Walk a condition tree, returning the verdict and the annotated node.
///
/// Every child of a group is evaluated, even after the verdict is settled,
/// so the annotated tree is complete.
pub(crate) fn eval_node(
    engine: &Engine<'_>,
    node: &ConditionNode,
) -> Result<(bool, EvaluationNode), RulebookError> {
    match node {
        ConditionNode::All { all } => {
            let (verdicts, children) = eval_children(engine, all)?;
            let result = verdicts.iter().all(|v| *v);
            Ok((result, EvaluationNode::All { children, result }))
        }
        ConditionNode::Any { any } => {
            let (verdicts, children) = eval_children(engine, any)?;
            let result = verdicts.iter().any(|v| *v);
            Ok((result, EvaluationNode::Any { children, result }))
        }
        ConditionNode::Leaf(leaf) => eval_leaf(engine, leaf),
    }
}

fn eval_children(
    engine: &Engine<'_>,
    nodes: &[ConditionNode],
) -> Result<(Vec<bool>, Vec<EvaluationNode>), RulebookError> {
    let mut verdicts = Vec::with_capacity(nodes.len());
    let mut children = Vec::with_capacity(nodes.len());
    for node in nodes {
        let (verdict, child) = eval_node(engine, node)?;
        verdicts.push(verdict);
        children.push(child);
    }
    Ok((verdicts, children))
}

fn eval_leaf(engine: &Engine<'_>, leaf: &Leaf) -> Result<(bool, EvaluationNode), RulebookError> {
    let value = match &leaf.value_condition {
        Some(rules) => computed_value(engine, rules)?,
        None => leaf.value.clone(),
    };

    let (default_label, declared, subject) = if let Some(source) = &leaf.expression {
        let expr = parse(source)?;
        let result = crate::expression::evaluate(engine.variables, engine.actions, &expr)?;
        (source.clone(), None, TypedValue::cast(&result))
    } else if let Some(function) = &leaf.function {
        let result = invoke(engine.variables, engine.actions, function, &leaf.params)?;
        (render_call(function, &leaf.params), None, TypedValue::cast(&result))
    } else if let Some(name) = &leaf.name {
        (
            name.clone(),
            engine.variables.field_type(name),
            resolve(engine.variables, name),
        )
    } else {
        let label = leaf.label.clone().unwrap_or_default();
        return Ok((
            false,
            EvaluationNode::Display {
                label,
                threshold: value,
            },
        ));
    };

    let label = leaf.label.clone().unwrap_or(default_label);
    let operator = leaf
        .operator
        .as_deref()
        .ok_or_else(|| StructuralError::MissingOperator {
            label: label.clone(),
        })?;

    let result = crate::dispatch::compare_as(declared, &subject, operator, &value)?;
    let comparison = comparison_text(&label, operator, &value);
    trace!(%comparison, %result, "condition evaluated");

    Ok((
        result.is_true(),
        EvaluationNode::Condition {
            label,
            input: subject.to_raw(),
            comparison,
            result,
        },
    ))
}

/// Run a `value_condition` rule list and take the first triggered rule's
/// action result. Null when no rule triggers.
fn computed_value(engine: &Engine<'_>, rules: &[Rule]) -> Result<RawValue, RulebookError> {
    let options = RunOptions::new()
        .stop_on_first_trigger(true)
        .return_action_results(true);
    let outcome = run_rules(engine, rules, options)?;
    let value = outcome.action_result().cloned().unwrap_or_default();
    debug!(triggered = outcome.triggered(), %value, "computed comparison value");
    Ok(value)
}

fn render_call(function: &str, params: &[RawValue]) -> String {
    let args: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("{function}({})", args.join(", "))
}

fn comparison_text(label: &str, operator: &str, value: &RawValue) -> String {
    match Operator::from_name(operator) {
        Some(op) if op.input() == InputKind::None => format!("{label} {}", op.symbol()),
        Some(op) => format!("{label} {} {value}", op.symbol()),
        None => format!("{label} {operator} {value}"),
    }
}

pub(crate) fn run_rule(
    engine: &Engine<'_>,
    rule: &Rule,
    shape: ResultShape,
) -> Result<RunOutcome, RulebookError> {
    let (triggered, node) = eval_node(engine, &rule.conditions)?;
    if !triggered {
        return Ok(RunOutcome::new(false, RunOutput::Audit(vec![node])));
    }

    let result = do_actions(engine.variables, engine.actions, &rule.actions)?;
    let output = match shape {
        ResultShape::Audit => RunOutput::Audit(vec![node]),
        ResultShape::ActionResult => RunOutput::ActionResult(result),
    };
    Ok(RunOutcome::new(true, output))
}

pub(crate) fn run_rules(
    engine: &Engine<'_>,
    rules: &[Rule],
    options: RunOptions,
) -> Result<RunOutcome, RulebookError> {
    let mut triggered = false;
    let mut audit = Vec::with_capacity(rules.len());

    for (index, rule) in rules.iter().enumerate() {
        let outcome = run_rule(engine, rule, options.shape())?;
        if !outcome.triggered() {
            if let RunOutput::Audit(nodes) = outcome.into_output() {
                audit.extend(nodes);
            }
            continue;
        }

        debug!(rule = index, "rule triggered");
        triggered = true;
        match outcome.into_output() {
            RunOutput::ActionResult(value) => {
                return Ok(RunOutcome::new(true, RunOutput::ActionResult(value)));
            }
            RunOutput::Audit(nodes) => audit.extend(nodes),
        }
        if options.stops_on_first_trigger() {
            break;
        }
    }

    Ok(RunOutcome::new(triggered, RunOutput::Audit(audit)))
}
