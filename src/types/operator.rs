use std::fmt;

/// The declared type of a variable. Fixes which operators apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Numeric,
    Text,
    Boolean,
}

/// How many comparison arguments an operator takes, and how the rule's
/// `value` is passed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The comparison value is ignored.
    None,
    /// One argument, cast to the receiver's type.
    Single,
    /// Two arguments, spread from a two-element list.
    Pair,
    /// The whole list is passed as one argument, uncast.
    List,
}

/// Named comparison operators. Each [`FieldType`] owns a fixed subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    EqualTo,
    EqualToCaseInsensitive,
    StartsWith,
    EndsWith,
    Contains,
    DoesNotContain,
    MatchesRegex,
    NonEmpty,
    IsIn,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Between,
    BetweenEqual,
    IsTrue,
    IsFalse,
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::EqualTo,
    Operator::EqualToCaseInsensitive,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::MatchesRegex,
    Operator::NonEmpty,
    Operator::IsIn,
];

const NUMERIC_OPERATORS: &[Operator] = &[
    Operator::EqualTo,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqualTo,
    Operator::LessThan,
    Operator::LessThanOrEqualTo,
    Operator::Between,
    Operator::BetweenEqual,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::IsTrue, Operator::IsFalse];

const ALL_OPERATORS: &[Operator] = &[
    Operator::EqualTo,
    Operator::EqualToCaseInsensitive,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::MatchesRegex,
    Operator::NonEmpty,
    Operator::IsIn,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqualTo,
    Operator::LessThan,
    Operator::LessThanOrEqualTo,
    Operator::Between,
    Operator::BetweenEqual,
    Operator::IsTrue,
    Operator::IsFalse,
];

impl FieldType {
    /// The operator table for this type.
    #[must_use]
    pub fn operators(self) -> &'static [Operator] {
        match self {
            FieldType::Numeric => NUMERIC_OPERATORS,
            FieldType::Text => TEXT_OPERATORS,
            FieldType::Boolean => BOOLEAN_OPERATORS,
        }
    }

    #[must_use]
    pub fn supports(self, op: Operator) -> bool {
        self.operators().contains(&op)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Numeric => "numeric",
            FieldType::Text => "string",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operator {
    /// Look up an operator by its rule-document name, e.g. `"greater_than"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Operator> {
        ALL_OPERATORS.iter().copied().find(|op| op.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operator::EqualTo => "equal_to",
            Operator::EqualToCaseInsensitive => "equal_to_case_insensitive",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "does_not_contain",
            Operator::MatchesRegex => "matches_regex",
            Operator::NonEmpty => "non_empty",
            Operator::IsIn => "is_in",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanOrEqualTo => "greater_than_or_equal_to",
            Operator::LessThan => "less_than",
            Operator::LessThanOrEqualTo => "less_than_or_equal_to",
            Operator::Between => "between",
            Operator::BetweenEqual => "between_equal",
            Operator::IsTrue => "is_true",
            Operator::IsFalse => "is_false",
        }
    }

    /// Rendering used in the `comparison` text of audit nodes.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::EqualTo => "==",
            Operator::EqualToCaseInsensitive => "== (case insensitive)",
            Operator::StartsWith => "startswith",
            Operator::EndsWith => "endswith",
            Operator::Contains => "in",
            Operator::DoesNotContain => "not in",
            Operator::MatchesRegex => "matches_regex",
            Operator::NonEmpty => "is not empty",
            Operator::IsIn => "is in",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::Between => "between",
            Operator::BetweenEqual => "between (inclusive)",
            Operator::IsTrue => "is true",
            Operator::IsFalse => "is false",
        }
    }

    #[must_use]
    pub fn input(self) -> InputKind {
        match self {
            Operator::NonEmpty | Operator::IsTrue | Operator::IsFalse => InputKind::None,
            Operator::IsIn => InputKind::List,
            Operator::Between | Operator::BetweenEqual => InputKind::Pair,
            _ => InputKind::Single,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for op in ALL_OPERATORS {
            assert_eq!(Operator::from_name(op.name()), Some(*op));
        }
        assert_eq!(Operator::from_name("approximately"), None);
    }

    #[test]
    fn every_operator_belongs_to_a_type() {
        for op in ALL_OPERATORS {
            assert!(
                [FieldType::Numeric, FieldType::Text, FieldType::Boolean]
                    .iter()
                    .any(|t| t.supports(*op)),
                "{op} has no owning type"
            );
        }
    }

    #[test]
    fn tables_are_disjoint_except_equality() {
        assert!(FieldType::Text.supports(Operator::EqualTo));
        assert!(FieldType::Numeric.supports(Operator::EqualTo));
        assert!(!FieldType::Numeric.supports(Operator::StartsWith));
        assert!(!FieldType::Text.supports(Operator::GreaterThan));
        assert!(!FieldType::Boolean.supports(Operator::EqualTo));
    }

    #[test]
    fn input_kinds() {
        assert_eq!(Operator::IsTrue.input(), InputKind::None);
        assert_eq!(Operator::NonEmpty.input(), InputKind::None);
        assert_eq!(Operator::IsIn.input(), InputKind::List);
        assert_eq!(Operator::Between.input(), InputKind::Pair);
        assert_eq!(Operator::GreaterThan.input(), InputKind::Single);
    }
}
