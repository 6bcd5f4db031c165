use rulebook::{rules_from_json, Actions, Engine, RunOptions, Variables};
use tracing_subscriber::EnvFilter;

const RULES: &str = r#"[
    {
        "conditions": {"any": [
            {"name": "user.banned", "operator": "is_true"},
            {"name": "request.region", "operator": "is_in", "value": ["restricted", "embargoed"]}
        ]},
        "actions": [{"name": "decide", "params": ["deny"]}]
    },
    {
        "conditions": {"all": [
            {"name": "user.age", "operator": "greater_than_or_equal_to", "value": 18},
            {"name": "user.status", "operator": "equal_to_case_insensitive", "value": "ACTIVE"},
            {"expression": "cart.total - cart.discount", "operator": "between_equal", "value": [10, 500]},
            {"name": "user.referrer", "operator": "non_empty"},
            {"label": "Manual review above", "value": 500}
        ]},
        "actions": [{"name": "decide", "params": ["allow"]}]
    }
]"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules = rules_from_json(RULES).expect("rule document is malformed");

    let variables = Variables::new()
        .set("user.age", 25_i64)
        .set("user.status", "active")
        .set("user.banned", false)
        .set("request.region", "us-east")
        .set("cart.total", 120.5_f64)
        .set("cart.discount", 20_i64);

    let actions = Actions::new()
        .with_arithmetic()
        .register("decide", 1, |args| Ok(args[0].clone()));

    let engine = Engine::new(&variables, &actions);
    let outcome = engine
        .run_all(&rules, RunOptions::new())
        .expect("rule evaluation failed");

    println!("{outcome}");
    for (index, tree) in outcome.audit().unwrap_or_default().iter().enumerate() {
        println!("\nrule {index}:\n{tree}");
    }

    let json = serde_json::to_string_pretty(&outcome.audit()).expect("audit serializes");
    println!("\n{json}");
}
