use crate::parse::parse;
use crate::{ConditionNode, Leaf, Rule, RulebookError, StructuralError};

/// Check every rule before any of them is evaluated, so a malformed rule
/// late in the list cannot leave earlier actions half-executed.
pub(crate) fn check_rules(rules: &[Rule], max_depth: usize) -> Result<(), RulebookError> {
    for rule in rules {
        check_node(&rule.conditions, 1, max_depth)?;
    }
    Ok(())
}

pub(crate) fn check_tree(node: &ConditionNode, max_depth: usize) -> Result<(), RulebookError> {
    check_node(node, 1, max_depth)
}

fn check_node(node: &ConditionNode, depth: usize, max_depth: usize) -> Result<(), RulebookError> {
    if depth > max_depth {
        return Err(StructuralError::TooDeep { max_depth }.into());
    }
    match node {
        ConditionNode::All { all: children } => check_group("all", children, depth, max_depth),
        ConditionNode::Any { any: children } => check_group("any", children, depth, max_depth),
        ConditionNode::Leaf(leaf) => check_leaf(leaf, depth, max_depth),
    }
}

fn check_group(
    kind: &'static str,
    children: &[ConditionNode],
    depth: usize,
    max_depth: usize,
) -> Result<(), RulebookError> {
    if children.is_empty() {
        return Err(StructuralError::EmptyGroup { kind }.into());
    }
    for child in children {
        check_node(child, depth + 1, max_depth)?;
    }
    Ok(())
}

fn check_leaf(leaf: &Leaf, depth: usize, max_depth: usize) -> Result<(), RulebookError> {
    if leaf.has_subject() {
        if leaf.operator.is_none() {
            return Err(StructuralError::MissingOperator {
                label: leaf_label(leaf),
            }
            .into());
        }
    } else if leaf.label.is_none() {
        return Err(StructuralError::EmptyLeaf.into());
    }

    if let Some(source) = &leaf.expression {
        parse(source)?;
    }

    if let Some(rules) = &leaf.value_condition {
        for rule in rules {
            check_node(&rule.conditions, depth + 1, max_depth)?;
        }
    }
    Ok(())
}

fn leaf_label(leaf: &Leaf) -> String {
    leaf.label
        .as_ref()
        .or(leaf.expression.as_ref())
        .or(leaf.function.as_ref())
        .or(leaf.name.as_ref())
        .cloned()
        .unwrap_or_default()
}
