use serde::{Deserialize, Serialize};

use super::value::RawValue;

/// A rule: a condition tree guarding a list of actions.
///
/// Rules are plain data, usually deserialized from a host-persisted JSON
/// document with [`Rule::from_json()`] or [`rules_from_json()`](crate::rules_from_json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub conditions: ConditionNode,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

/// A node of a condition tree.
///
/// In JSON, `{"all": [...]}` and `{"any": [...]}` are groups; any other
/// mapping is a [`Leaf`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    All { all: Vec<ConditionNode> },
    Any { any: Vec<ConditionNode> },
    Leaf(Leaf),
}

/// A leaf comparison, or a display leaf when only `label` is set.
///
/// The subject comes from the first present field of `expression`,
/// `function`, `name`, in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Leaf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "RawValue::is_null")]
    pub value: RawValue,
    /// Rules whose first triggered action result replaces `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_condition: Option<Vec<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One action to invoke when a rule triggers. String parameters that name a
/// known variable are replaced by its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub name: String,
    #[serde(default)]
    pub params: Vec<RawValue>,
}

impl Rule {
    #[must_use]
    pub fn new(conditions: ConditionNode, actions: Vec<ActionSpec>) -> Self {
        Self {
            conditions,
            actions,
        }
    }

    /// Parse a single rule document.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError::Json`](crate::RulebookError::Json) if the
    /// document does not have the rule shape.
    pub fn from_json(input: &str) -> Result<Self, crate::RulebookError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Parse a document holding a JSON array of rules.
///
/// # Errors
///
/// Returns [`RulebookError::Json`](crate::RulebookError::Json) if the
/// document is not an array of rules.
pub fn rules_from_json(input: &str) -> Result<Vec<Rule>, crate::RulebookError> {
    Ok(serde_json::from_str(input)?)
}

impl ConditionNode {
    #[must_use]
    pub fn all(children: Vec<ConditionNode>) -> Self {
        ConditionNode::All { all: children }
    }

    #[must_use]
    pub fn any(children: Vec<ConditionNode>) -> Self {
        ConditionNode::Any { any: children }
    }
}

impl From<Leaf> for ConditionNode {
    fn from(leaf: Leaf) -> Self {
        ConditionNode::Leaf(leaf)
    }
}

impl Leaf {
    /// A comparison on a named variable.
    #[must_use]
    pub fn variable(name: &str, operator: &str, value: impl Into<RawValue>) -> Self {
        Self {
            name: Some(name.to_owned()),
            operator: Some(operator.to_owned()),
            value: value.into(),
            ..Self::default()
        }
    }

    /// A comparison on an arithmetic expression.
    #[must_use]
    pub fn expression(source: &str, operator: &str, value: impl Into<RawValue>) -> Self {
        Self {
            expression: Some(source.to_owned()),
            operator: Some(operator.to_owned()),
            value: value.into(),
            ..Self::default()
        }
    }

    /// A comparison on the result of a host function.
    #[must_use]
    pub fn function(
        name: &str,
        params: Vec<RawValue>,
        operator: &str,
        value: impl Into<RawValue>,
    ) -> Self {
        Self {
            function: Some(name.to_owned()),
            params,
            operator: Some(operator.to_owned()),
            value: value.into(),
            ..Self::default()
        }
    }

    /// A display leaf: carries a label and threshold, never satisfies a rule.
    #[must_use]
    pub fn display(label: &str, threshold: impl Into<RawValue>) -> Self {
        Self {
            label: Some(label.to_owned()),
            value: threshold.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    #[must_use]
    pub fn with_value_condition(mut self, rules: Vec<Rule>) -> Self {
        self.value_condition = Some(rules);
        self
    }

    /// Whether a subject-producing field is present.
    #[must_use]
    pub fn has_subject(&self) -> bool {
        self.expression.is_some() || self.function.is_some() || self.name.is_some()
    }

    #[must_use]
    pub fn is_display(&self) -> bool {
        !self.has_subject() && self.label.is_some()
    }
}

impl ActionSpec {
    #[must_use]
    pub fn new(name: &str, params: Vec<RawValue>) -> Self {
        Self {
            name: name.to_owned(),
            params,
        }
    }
}
