use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rulebook::{
    rules_from_json, run_all, Accessors, ActionError, ActionSpec, Actions, ConditionNode, Engine,
    EvaluationNode, Leaf, RawValue, ResultShape, Rule, RulebookError, RunOptions, RunOutput,
    Truth, Variables,
};
use rust_decimal::Decimal;

fn leaf_result(node: &EvaluationNode) -> Truth {
    match node {
        EvaluationNode::Condition { result, .. } => *result,
        other => panic!("expected a condition node, got {other:?}"),
    }
}

#[test]
fn age_boundary_is_inclusive() {
    let variables = Variables::new().set("age", 18_i64);
    let actions = Actions::new();
    let engine = Engine::new(&variables, &actions);

    let tree = Leaf::variable("age", "greater_than_or_equal_to", 18_i64).into();
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(verdict);
    assert_eq!(leaf_result(&node), Truth::True);
}

#[test]
fn null_age_is_not_applicable() {
    let variables = Variables::new().set("age", RawValue::Null);
    let actions = Actions::new();
    let engine = Engine::new(&variables, &actions);

    let tree = Leaf::variable("age", "greater_than_or_equal_to", 18_i64).into();
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(!verdict);
    assert_eq!(leaf_result(&node), Truth::NotApplicable);
}

#[test]
fn nested_all_any() {
    let variables = Variables::new()
        .set("x", true)
        .set("y", false)
        .set("z", true);
    let actions = Actions::new();
    let engine = Engine::new(&variables, &actions);

    let tree = ConditionNode::all(vec![
        Leaf::variable("x", "is_true", RawValue::Null).into(),
        ConditionNode::any(vec![
            Leaf::variable("y", "is_true", RawValue::Null).into(),
            Leaf::variable("z", "is_true", RawValue::Null).into(),
        ]),
    ]);
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(verdict);

    let EvaluationNode::All { children, result } = node else {
        panic!("expected an all node");
    };
    assert!(result);
    let EvaluationNode::Any { children: inner, .. } = &children[1] else {
        panic!("expected an any node");
    };
    assert_eq!(leaf_result(&inner[0]), Truth::False);
    assert_eq!(leaf_result(&inner[1]), Truth::True);
}

#[test]
fn arity_error_names_counts() {
    let variables = Variables::new().set("amount", 10_i64);
    let actions = Actions::new().register("transfer", 2, |_| Ok(RawValue::Null));
    let engine = Engine::new(&variables, &actions);

    let err = engine
        .do_actions(&[ActionSpec::new("transfer", vec!["amount".into()])])
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("transfer"), "{message}");
    assert!(message.contains('1'), "{message}");
    assert!(message.contains('2'), "{message}");
    assert!(matches!(err, RulebookError::Action(ActionError::Arity { .. })));
}

#[test]
fn expression_round_trip() {
    let actions = Actions::new().register("add", 2, |args| {
        let sum = args[0].as_decimal().unwrap_or_default() + args[1].as_decimal().unwrap_or_default();
        Ok(sum.into())
    });

    let variables = Variables::new().set("a", 2_i64).set("b", 3_i64);
    let result = Engine::new(&variables, &actions)
        .evaluate_expression("a + b")
        .unwrap();
    assert_eq!(result.as_decimal(), Some(Decimal::from(5)));

    let variables = Variables::new().set("b", 3_i64);
    let result = Engine::new(&variables, &actions)
        .evaluate_expression("a + b")
        .unwrap();
    assert_eq!(result, RawValue::Null);
}

#[test]
fn stop_on_first_trigger_skips_later_rules() {
    let later_reads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&later_reads);
    let variables = Accessors::new()
        .register("first", || RawValue::Int(1))
        .register("second", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            RawValue::Int(1)
        });
    let actions = Actions::new();

    let rules = vec![
        Rule::new(Leaf::variable("first", "equal_to", 1_i64).into(), vec![]),
        Rule::new(Leaf::variable("second", "equal_to", 1_i64).into(), vec![]),
    ];

    let outcome = run_all(
        &rules,
        &variables,
        &actions,
        RunOptions::new().stop_on_first_trigger(true),
    )
    .unwrap();
    assert!(outcome.triggered());
    assert_eq!(later_reads.load(Ordering::SeqCst), 0);

    let outcome = run_all(&rules, &variables, &actions, RunOptions::new()).unwrap();
    assert!(outcome.triggered());
    assert_eq!(later_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn display_leaf_never_satisfies_any() {
    let variables = Variables::new();
    let actions = Actions::new();
    let engine = Engine::new(&variables, &actions);

    let tree = ConditionNode::any(vec![Leaf::display("Credit limit", 5000_i64).into()]);
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(!verdict);
    assert!(!node.passed());
}

#[test]
fn not_applicable_never_satisfies_any() {
    let variables = Variables::new().set("score", RawValue::Null);
    let actions = Actions::new();
    let engine = Engine::new(&variables, &actions);

    let tree = ConditionNode::any(vec![
        Leaf::variable("score", "greater_than", 10_i64).into(),
        Leaf::variable("score", "less_than", 10_i64).into(),
        Leaf::variable("missing", "equal_to", 0_i64).into(),
    ]);
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(!verdict);

    let EvaluationNode::Any { children, .. } = node else {
        panic!("expected an any node");
    };
    assert!(children
        .iter()
        .all(|child| leaf_result(child) == Truth::NotApplicable));
}

#[test]
fn json_rules_against_json_variables() {
    let rules = rules_from_json(
        r#"[
            {
                "conditions": {"all": [
                    {"name": "age", "operator": "greater_than_or_equal_to", "value": 18},
                    {"name": "country", "operator": "is_in", "value": ["DE", "FR"]}
                ]},
                "actions": [{"name": "approve", "params": ["age"]}]
            },
            {
                "conditions": {"any": [
                    {"name": "nickname", "operator": "non_empty"},
                    {"label": "Fallback", "value": "manual review"}
                ]},
                "actions": [{"name": "review"}]
            }
        ]"#,
    )
    .unwrap();

    let variables: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(r#"{"age": 30, "country": "FR", "nickname": null}"#).unwrap();
    let actions = Actions::new()
        .register("approve", 1, |args| Ok(args[0].clone()))
        .register("review", 0, |_| Ok("review".into()));

    let outcome = run_all(&rules, &variables, &actions, RunOptions::new()).unwrap();
    assert!(outcome.triggered());

    let audit = serde_json::to_value(outcome.audit().unwrap()).unwrap();
    assert_eq!(audit[0]["type"], "all");
    assert_eq!(audit[0]["result"], true);
    assert_eq!(audit[0]["children"][0]["comparison"], "age >= 18");
    assert_eq!(audit[1]["children"][0]["result"], "not_applicable");
    assert_eq!(audit[1]["children"][1]["type"], "display");
    assert_eq!(audit[1]["children"][1]["threshold"], "manual review");

    let outcome = run_all(
        &rules,
        &variables,
        &actions,
        RunOptions::new().return_action_results(true),
    )
    .unwrap();
    assert_eq!(
        outcome.into_output(),
        RunOutput::ActionResult(RawValue::Decimal(Decimal::from(30)))
    );
}

#[test]
fn computed_threshold_from_nested_rules() {
    let rule = Rule::from_json(
        r#"{
            "conditions": {
                "name": "order.total",
                "operator": "less_than_or_equal_to",
                "value_condition": [
                    {
                        "conditions": {"name": "customer.tier", "operator": "equal_to", "value": "gold"},
                        "actions": [{"name": "limit_for", "params": ["customer.tier"]}]
                    },
                    {
                        "conditions": {"name": "customer.tier", "operator": "non_empty"},
                        "actions": [{"name": "limit_for", "params": ["standard"]}]
                    }
                ]
            },
            "actions": [{"name": "accept"}]
        }"#,
    )
    .unwrap();

    let actions = Actions::new()
        .register("limit_for", 1, |args| {
            Ok(match args[0].as_str() {
                Some("gold") => RawValue::Int(1000),
                _ => RawValue::Int(200),
            })
        })
        .register("accept", 0, |_| Ok("accepted".into()));

    let gold = Variables::new()
        .set("customer.tier", "gold")
        .set("order.total", 750_i64);
    let outcome = Engine::new(&gold, &actions)
        .run(&rule, ResultShape::ActionResult)
        .unwrap();
    assert_eq!(outcome.action_result(), Some(&RawValue::Text("accepted".into())));

    let silver = Variables::new()
        .set("customer.tier", "silver")
        .set("order.total", 750_i64);
    let outcome = Engine::new(&silver, &actions)
        .run(&rule, ResultShape::Audit)
        .unwrap();
    assert!(!outcome.triggered());
    let audit = outcome.audit().unwrap();
    assert!(matches!(
        &audit[0],
        EvaluationNode::Condition { comparison, result: Truth::False, .. }
            if comparison == "order.total <= 200"
    ));
}

#[test]
fn function_leaf_uses_host_result() {
    let variables = Variables::new().set("user.id", 42_i64);
    let actions = Actions::new().register("open_tickets", 1, |args| {
        Ok(match args[0].as_decimal() {
            Some(id) if id == Decimal::from(42) => RawValue::Int(3),
            _ => RawValue::Int(0),
        })
    });
    let engine = Engine::new(&variables, &actions);

    let tree = Leaf::function("open_tickets", vec!["user.id".into()], "between", vec![1_i64, 5])
        .into();
    let (verdict, node) = engine.check_conditions(&tree).unwrap();
    assert!(verdict);
    assert!(matches!(
        node,
        EvaluationNode::Condition { ref label, .. } if label == "open_tickets(\"user.id\")"
    ));
}
