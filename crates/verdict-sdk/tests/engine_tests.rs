//! End-to-end evaluation of the fixture decisions

mod common;

use serde_json::json;
use verdict_sdk::{DecisionEngine, EngineConfig, EvaluationOptions, MemoryLoader, Value};

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn test_decision_table() {
    let engine = common::engine(1);

    let low = engine.evaluate("table.json", &json!({"input": 5})).unwrap();
    assert_eq!(low.result, value(json!({"output": 0})));
    assert_eq!(serde_json::to_string(&low.result).unwrap(), r#"{"output":0}"#);

    let high = engine.evaluate("table.json", &json!({"input": 15})).unwrap();
    assert_eq!(high.result, value(json!({"output": 10})));
}

#[test]
fn test_function_node() {
    let engine = common::engine(1);

    for input in [1, 5, 15] {
        let response = engine.evaluate("function.json", &json!({"input": input})).unwrap();
        assert_eq!(response.result, value(json!({"output": input * 2})));
    }
}

#[test]
fn test_expression_node() {
    let engine = common::engine(1);
    let context = json!({
        "numbers": [1, 5, 15, 25],
        "firstName": "John",
        "lastName": "Doe"
    });

    let response = engine.evaluate("expression.json", &context).unwrap();
    assert_eq!(
        serde_json::to_string(&response.result).unwrap(),
        r#"{"deep":{"nested":{"sum":46}},"fullName":"John Doe","largeNumbers":[15,25],"smallNumbers":[1,5]}"#
    );
}

#[test]
fn test_context_from_struct() {
    #[derive(serde::Serialize)]
    struct Request {
        input: u32,
    }

    let response = common::engine(1)
        .evaluate("table.json", &Request { input: 42 })
        .unwrap();
    assert_eq!(response.result, value(json!({"output": 10})));
}

#[test]
fn test_identical_inputs_give_identical_bytes() {
    let engine = common::engine(1);
    let context = json!({"numbers": [3, 1, 2], "firstName": "A", "lastName": "B"});

    let first = engine.evaluate("expression.json", &context).unwrap();
    let second = engine.evaluate("expression.json", &context).unwrap();
    assert_eq!(
        serde_json::to_vec(&first.result).unwrap(),
        serde_json::to_vec(&second.result).unwrap()
    );
}

#[test]
fn test_trace_via_options() {
    let engine = common::engine(1);

    let response = engine
        .evaluate_with_options("table.json", &json!({"input": 15}), EvaluationOptions::new(true, 1))
        .unwrap();

    let trace = response.trace.expect("trace requested");
    assert_eq!(trace.len(), 3);
    assert_eq!(trace[1].id, "table");
    assert_eq!(trace[1].name, "Tier table");
    assert_eq!(trace[1].input, value(json!({"input": 15})));
    assert_eq!(
        trace[1].trace_data,
        Some(value(json!({"matched": [{"index": 1, "id": "high"}]})))
    );

    let json = serde_json::to_value(&trace[1]).unwrap();
    assert!(json.get("traceData").is_some());
}

#[test]
fn test_trace_from_config_default() {
    let engine = common::builder().trace(true).build();
    let response = engine.evaluate("function.json", &json!({"input": 1})).unwrap();
    assert_eq!(response.trace.map(|t| t.len()), Some(3));
}

#[test]
fn test_sub_decision() {
    let engine = common::engine(2);

    let response = engine
        .evaluate_with_options(
            "sub-decision.json",
            &json!({"input": 12}),
            EvaluationOptions::new(true, 2),
        )
        .unwrap();
    assert_eq!(response.result, value(json!({"output": 10, "label": "high"})));

    // child trace nested in the decision node's trace data
    let trace = response.trace.unwrap();
    let child = trace[1].trace_data.as_ref().and_then(Value::as_array).unwrap();
    assert_eq!(child.len(), 3);
    assert_eq!(child[1].get("id"), Some(&value(json!("table"))));
}

#[test]
fn test_get_and_create_decision() {
    let engine = common::engine(1);

    let decision = engine.get_decision("function.json").unwrap();
    assert_eq!(decision.key(), Some("function.json"));
    let response = decision.evaluate(&json!({"input": 21})).unwrap();
    assert_eq!(response.result, value(json!({"output": 42})));

    let created = engine.create_decision(common::fixture("table.json")).unwrap();
    assert_eq!(created.key(), None);
    let response = created.evaluate(&json!({"input": 3})).unwrap();
    assert_eq!(response.result, value(json!({"output": 0})));

    decision.dispose();
    created.dispose();
    engine.dispose();
}

#[test]
fn test_created_decision_resolves_sub_decisions_through_loader() {
    let engine = common::engine(2);
    let decision = engine.create_decision(common::fixture("sub-decision.json")).unwrap();

    let response = decision.evaluate(&json!({"input": 1})).unwrap();
    assert_eq!(response.result, value(json!({"output": 0, "label": "low"})));
}

#[test]
fn test_yaml_document_from_memory_loader() {
    let yaml = r#"
nodes:
  - { id: in, type: inputNode }
  - id: grade
    type: decisionTableNode
    content:
      hitPolicy: collect
      inputs: [{ id: score, field: score }]
      outputs: [{ id: tag, field: tags.grade }]
      rules:
        - { _id: pass, score: ">= 50", tag: "'pass'" }
        - { _id: merit, score: ">= 75", tag: "'merit'" }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: grade }
  - { sourceId: grade, targetId: out }
"#;
    let engine = DecisionEngine::builder()
        .with_loader(MemoryLoader::new().with("grade", yaml))
        .build();

    let response = engine.evaluate("grade", &json!({"score": 80})).unwrap();
    assert_eq!(response.result, value(json!({"tags": {"grade": "merit"}})));

    let response = engine.evaluate("grade", &json!({"score": 10})).unwrap();
    assert_eq!(response.result, value(json!({})));
}

#[test]
fn test_cache_from_yaml_config() {
    let config = EngineConfig::from_yaml_str("default_max_depth: 3\ncache: true\n").unwrap();
    let engine = common::builder().with_config(config).build();

    engine.evaluate("sub-decision.json", &json!({"input": 20})).unwrap();
    // parent and child are both cached
    assert_eq!(engine.cached_decisions(), 2);

    engine.evaluate("sub-decision.json", &json!({"input": 1})).unwrap();
    assert_eq!(engine.cached_decisions(), 2);
    engine.dispose();
}
