use rulebook::{ActionSpec, Actions, ConditionNode, Engine, Leaf, ResultShape, Rule, Variables};

fn main() {
    let variables = Variables::new()
        .set("user.age", 25_i64)
        .set("user.status", "active")
        .set("user.email", "ada@example.com");

    let actions = Actions::named("Onboarding").register("welcome", 1, |args| {
        Ok(format!("welcome mail sent to {}", args[0]).into())
    });

    let rule = Rule::new(
        ConditionNode::all(vec![
            Leaf::variable("user.age", "greater_than_or_equal_to", 18_i64).into(),
            Leaf::variable("user.status", "equal_to", "active").into(),
        ]),
        vec![ActionSpec::new("welcome", vec!["user.email".into()])],
    );

    let engine = Engine::new(&variables, &actions);
    let outcome = engine
        .run(&rule, ResultShape::ActionResult)
        .expect("rule evaluation failed");

    println!("{outcome}");
}
