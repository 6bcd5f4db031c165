use rulebook::{Accessors, ActionSpec, Actions, Engine, FieldType, Leaf, RawValue, ResultShape, Rule};

/// Credit limit by tier, resolved through nested rules at evaluation time.
fn limit_rules() -> Vec<Rule> {
    [("platinum", 10_000_i64), ("gold", 5_000), ("silver", 1_000)]
        .into_iter()
        .map(|(tier, limit)| {
            Rule::new(
                Leaf::variable("customer.tier", "equal_to", tier).into(),
                vec![ActionSpec::new("limit", vec![limit.into()])],
            )
        })
        .collect()
}

fn main() {
    let rule = Rule::new(
        Leaf::variable("order.total", "less_than_or_equal_to", RawValue::Null)
            .with_label("Order total")
            .with_value_condition(limit_rules())
            .into(),
        vec![ActionSpec::new("approve", vec!["order.id".into()])],
    );

    let actions = Actions::named("Credit")
        .register("limit", 1, |args| Ok(args[0].clone()))
        .register("approve", 1, |args| Ok(format!("order {} approved", args[0]).into()));

    for (tier, total) in [("gold", 4_200_i64), ("silver", 4_200), ("bronze", 50)] {
        let variables = Accessors::new()
            .register("customer.tier", move || tier.into())
            .register_typed("order.total", FieldType::Numeric, move || total.into())
            .register("order.id", || "A-1001".into());

        let engine = Engine::new(&variables, &actions);
        let outcome = engine
            .run(&rule, ResultShape::Audit)
            .expect("rule evaluation failed");

        println!("tier {tier}: {outcome}");
        if let Some(audit) = outcome.audit() {
            for tree in audit {
                println!("{tree}");
            }
        }
    }
}
