
use proptest::prelude::*;
use rulebook::{
    compare, compare_as, Actions, Engine, EvaluationNode, FieldType, RawValue, Truth, TypedValue,
};
use rust_decimal::Decimal;
use strategies::{arb_decimal, arb_tree, arb_variables};

fn numeric(subject: Decimal, operator: &str, value: RawValue) -> Truth {
    compare(&TypedValue::Numeric(subject), operator, &value)
        .expect("numeric operators are defined for decimals")
}

fn holds(subject: Decimal, operator: &str, value: Decimal) -> bool {
    numeric(subject, operator, RawValue::Decimal(value)).is_true()
}

// ---------------------------------------------------------------------------
// Invariant 1: Epsilon equality
//
// Values within 1e-6 of each other are equal, and neither is greater or
// less than the other.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn near_values_are_equal(a in arb_decimal(), offset in -1_000_i64..=1_000) {
        let b = a + Decimal::new(offset, 9);
        prop_assert!(holds(a, "equal_to", b));
        prop_assert!(!holds(a, "greater_than", b));
        prop_assert!(!holds(a, "less_than", b));
        prop_assert!(holds(a, "greater_than_or_equal_to", b));
        prop_assert!(holds(a, "less_than_or_equal_to", b));
    }

    #[test]
    fn exactly_one_ordering_holds(a in arb_decimal(), b in arb_decimal()) {
        let results = [
            holds(a, "equal_to", b),
            holds(a, "greater_than", b),
            holds(a, "less_than", b),
        ];
        prop_assert_eq!(results.iter().filter(|r| **r).count(), 1);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Range operators are built from the comparison operators
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn between_matches_strict_bounds(x in arb_decimal(), lo in arb_decimal(), hi in arb_decimal()) {
        let bounds = RawValue::List(vec![RawValue::Decimal(lo), RawValue::Decimal(hi)]);
        let expected = holds(x, "greater_than", lo) && holds(x, "less_than", hi);
        prop_assert_eq!(numeric(x, "between", bounds).is_true(), expected);
    }

    #[test]
    fn between_equal_matches_inclusive_bounds(x in arb_decimal(), lo in arb_decimal(), hi in arb_decimal()) {
        let bounds = RawValue::List(vec![RawValue::Decimal(lo), RawValue::Decimal(hi)]);
        let expected = holds(x, "greater_than_or_equal_to", lo)
            && holds(x, "less_than_or_equal_to", hi);
        prop_assert_eq!(numeric(x, "between_equal", bounds).is_true(), expected);
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Absent operands are never true or false, except that an
// absent boolean receiver is false
// ---------------------------------------------------------------------------

const SINGLE_ARG_OPS: &[&str] = &["equal_to", "greater_than", "less_than_or_equal_to"];
const BOOLEAN_OPS: &[&str] = &["is_true", "is_false"];

proptest! {
    #[test]
    fn absent_comparison_value_is_not_applicable(
        x in arb_decimal(),
        op in prop::sample::select(SINGLE_ARG_OPS),
    ) {
        prop_assert_eq!(numeric(x, op, RawValue::Null), Truth::NotApplicable);
    }

    #[test]
    fn absent_subject_is_not_applicable(value in arb_decimal()) {
        let result = compare(&TypedValue::Absent, "greater_than", &RawValue::Decimal(value));
        prop_assert_eq!(result.ok(), Some(Truth::NotApplicable));
    }

    #[test]
    fn absent_boolean_receiver_is_false(
        op in prop::sample::select(BOOLEAN_OPS),
        value in prop_oneof![Just(RawValue::Null), any::<bool>().prop_map(RawValue::from)],
    ) {
        let result = compare_as(Some(FieldType::Boolean), &TypedValue::Absent, op, &value);
        prop_assert_eq!(result.ok(), Some(Truth::False));
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Group aggregation
//
// Verdicts follow the boolean model of the tree, every child of every group
// is reported, and evaluation is deterministic.
// ---------------------------------------------------------------------------

fn count_nodes(node: &EvaluationNode) -> usize {
    match node {
        EvaluationNode::All { children, .. } | EvaluationNode::Any { children, .. } => {
            1 + children.iter().map(count_nodes).sum::<usize>()
        }
        _ => 1,
    }
}

fn count_tree(tree: &strategies::GenTree) -> usize {
    match tree {
        strategies::GenTree::All(children) | strategies::GenTree::Any(children) => {
            1 + children.iter().map(count_tree).sum::<usize>()
        }
        _ => 1,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn verdict_matches_model(tree in arb_tree(), vars in arb_variables()) {
        let variables = vars.build();
        let actions = Actions::new();
        let engine = Engine::new(&variables, &actions);

        let (verdict, node) = engine.check_conditions(&tree.build()).unwrap();
        prop_assert_eq!(verdict, tree.model(&vars));
        prop_assert_eq!(node.passed(), verdict);
        prop_assert_eq!(count_nodes(&node), count_tree(&tree));

        let (again, node_again) = engine.check_conditions(&tree.build()).unwrap();
        prop_assert_eq!(again, verdict);
        prop_assert_eq!(node_again, node);
    }
}
