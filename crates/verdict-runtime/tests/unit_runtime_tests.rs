//! Graph-level tests for verdict-runtime
//!
//! Documents are compiled with verdict-compiler and evaluated through the
//! `GraphExecutor`.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use verdict_compiler::Compiler;
use verdict_core::{CompiledDecision, Value};
use verdict_runtime::{
    CustomNodeRegistry, EvaluationOptions, GraphExecutor, NodeRequest, NodeResponse,
    Result, RuntimeError, SubDecisionResolver,
};

fn compile(source: &str) -> CompiledDecision {
    Compiler::new()
        .compile_source(source.as_bytes(), None)
        .unwrap()
}

fn run(decision: &CompiledDecision, input: serde_json::Value) -> Value {
    GraphExecutor::new()
        .evaluate(decision, input.into(), &EvaluationOptions::default())
        .unwrap()
        .result
}

const PRICING: &str = r#"
nodes:
  - id: request
    name: Request
    type: inputNode
  - id: tier
    name: Tier
    type: decisionTableNode
    content:
      hitPolicy: first
      inputs:
        - id: amount
          name: Amount
          field: cart.total
      outputs:
        - id: tier
          name: Tier
          field: pricing.tier
      rules:
        - { _id: gold, amount: ">= 1000", tier: "'gold'" }
        - { _id: silver, amount: "[100..1000)", tier: "'silver'" }
        - { _id: base, _default: true, tier: "'base'" }
  - id: discount
    name: Discount
    type: expressionNode
    content:
      passThrough: true
      expressions:
        - id: e1
          key: pricing.discount
          value: "pricing.tier == 'gold' ? 0.1 : 0"
  - id: response
    name: Response
    type: outputNode
edges:
  - { sourceId: request, targetId: tier }
  - { sourceId: tier, targetId: discount }
  - { sourceId: discount, targetId: response }
"#;

#[test]
fn test_table_then_expression_chain() {
    let decision = compile(PRICING);

    assert_eq!(
        run(&decision, json!({"cart": {"total": 1500}})),
        Value::from(json!({"pricing": {"tier": "gold", "discount": 0.1}}))
    );
    assert_eq!(
        run(&decision, json!({"cart": {"total": 150}})),
        Value::from(json!({"pricing": {"tier": "silver", "discount": 0}}))
    );
    assert_eq!(
        run(&decision, json!({"cart": {"total": 5}})),
        Value::from(json!({"pricing": {"tier": "base", "discount": 0}}))
    );
}

#[test]
fn test_trace_records_every_node_in_order() {
    let decision = compile(PRICING);
    let options = EvaluationOptions::new(true, 1);

    let result = GraphExecutor::new()
        .evaluate(&decision, json!({"cart": {"total": 150}}).into(), &options)
        .unwrap();

    let trace = result.trace.unwrap();
    let ids: Vec<&str> = trace.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["request", "tier", "discount", "response"]);
    assert_eq!(trace[1].kind, "decisionTableNode");
    assert_eq!(trace[1].order, 1);
    assert_eq!(
        trace[1].trace_data,
        Some(Value::from(json!({"matched": [{"index": 1, "id": "silver"}]})))
    );
    assert_eq!(trace[3].output, result.result);
}

#[test]
fn test_no_trace_by_default() {
    let decision = compile(PRICING);
    let result = GraphExecutor::new()
        .evaluate(&decision, json!({"cart": {"total": 1}}).into(), &EvaluationOptions::default())
        .unwrap();
    assert!(result.trace.is_none());
}

#[test]
fn test_multiple_outputs_are_merged() {
    let decision = compile(
        r#"
nodes:
  - { id: in, type: inputNode }
  - id: a
    type: functionNode
    content: "{ left: x, shared: { a: 1 } }"
  - id: b
    type: functionNode
    content: "{ right: x * 2, shared: { b: 2 } }"
  - { id: out1, type: outputNode }
  - { id: out2, type: outputNode }
edges:
  - { sourceId: in, targetId: a }
  - { sourceId: in, targetId: b }
  - { sourceId: a, targetId: out1 }
  - { sourceId: b, targetId: out2 }
"#,
    );

    assert_eq!(
        run(&decision, json!({"x": 3})),
        Value::from(json!({"left": 3, "right": 6, "shared": {"a": 1, "b": 2}}))
    );
}

#[test]
fn test_input_schema_narrows_context() {
    let decision = compile(
        r#"
nodes:
  - id: in
    type: inputNode
    content: { schema: [keep] }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: out }
"#,
    );

    assert_eq!(
        run(&decision, json!({"keep": 1, "drop": 2})),
        Value::from(json!({"keep": 1}))
    );
}

const CUSTOM: &str = r#"
nodes:
  - { id: in, type: inputNode }
  - id: sum
    name: Sum
    type: customNode
    content:
      component: sum
      config: { a: "{{ a + b }}", b: "{{ c }}", key: sum }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: sum }
  - { sourceId: sum, targetId: out }
"#;

fn sum_handler() -> CustomNodeRegistry {
    CustomNodeRegistry::new().with("sum", |request: NodeRequest| -> anyhow::Result<NodeResponse> {
        let a: i64 = request.get_field("a")?;
        let b: i64 = request.get_field("b")?;
        let key: String = request.get_field_raw("key")?;
        let mut output = HashMap::new();
        output.insert(key, a + b);
        Ok(NodeResponse::from_serializable(&output)?)
    })
}

#[test]
fn test_custom_node_through_registry() {
    let decision = compile(CUSTOM);
    let executor = GraphExecutor::new().with_custom_handler(Arc::new(sum_handler()));

    let result = executor
        .evaluate(&decision, json!({"a": 5, "b": 10, "c": 15}).into(), &EvaluationOptions::default())
        .unwrap();
    assert_eq!(result.result, Value::from(json!({"sum": 30})));
}

#[test]
fn test_custom_node_without_handler() {
    let decision = compile(CUSTOM);
    let err = GraphExecutor::new()
        .evaluate(&decision, json!({}).into(), &EvaluationOptions::default())
        .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        RuntimeError::CustomNodeNotConfigured { node_id } if node_id == "sum"
    ));
}

#[test]
fn test_custom_node_handler_error_keeps_chain() {
    let decision = compile(CUSTOM);
    let failing = |_request: NodeRequest| -> anyhow::Result<NodeResponse> {
        Err(anyhow::anyhow!("backend offline").context("calling pricing service"))
    };
    let err = GraphExecutor::new()
        .with_custom_handler(Arc::new(failing))
        .evaluate(&decision, json!({}).into(), &EvaluationOptions::default())
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("calling pricing service: backend offline"), "{}", message);
    assert!(message.contains("'sum'"));
}

#[test]
fn test_node_error_names_node() {
    let decision = compile(
        r#"
nodes:
  - { id: in, type: inputNode }
  - { id: divide, type: functionNode, content: "a / b" }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: divide }
  - { sourceId: divide, targetId: out }
"#,
    );

    let err = GraphExecutor::new()
        .evaluate(&decision, json!({"a": 1, "b": 0}).into(), &EvaluationOptions::default())
        .unwrap_err();
    assert!(matches!(
        &err,
        RuntimeError::NodeFailed { node_id, source } if node_id == "divide"
            && matches!(**source, RuntimeError::DivisionByZero)
    ));
}

const PARENT: &str = r#"
nodes:
  - { id: in, type: inputNode }
  - id: child
    name: Child
    type: decisionNode
    content: { key: child.yaml }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: child }
  - { sourceId: child, targetId: out }
"#;

const CHILD: &str = r#"
nodes:
  - { id: in, type: inputNode }
  - { id: double, type: functionNode, content: "{ doubled: value * 2 }" }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: double }
  - { sourceId: double, targetId: out }
"#;

fn resolver() -> Arc<dyn SubDecisionResolver> {
    let child = Arc::new(compile(CHILD));
    let parent = Arc::new(compile(PARENT));
    Arc::new(move |key: &str| -> Result<Arc<CompiledDecision>> {
        match key {
            "child.yaml" => Ok(child.clone()),
            "parent.yaml" => Ok(parent.clone()),
            other => Err(RuntimeError::Resolution {
                key: other.to_string(),
                message: "not found".to_string(),
            }),
        }
    })
}

#[test]
fn test_sub_decision_with_trace() {
    let decision = compile(PARENT);
    let executor = GraphExecutor::new().with_resolver(resolver());

    let result = executor
        .evaluate(&decision, json!({"value": 21}).into(), &EvaluationOptions::new(true, 2))
        .unwrap();

    assert_eq!(result.result, Value::from(json!({"doubled": 42})));
    let trace = result.trace.unwrap();
    let child_trace = trace[1].trace_data.as_ref().unwrap();
    assert_eq!(child_trace.as_array().map(Vec::len), Some(3));
}

#[test]
fn test_sub_decision_blocked_by_default_depth() {
    let decision = compile(PARENT);
    let err = GraphExecutor::new()
        .with_resolver(resolver())
        .evaluate(&decision, json!({"value": 1}).into(), &EvaluationOptions::default())
        .unwrap_err();

    assert!(matches!(err.root_cause(), RuntimeError::DepthExceeded { max_depth: 1 }));
}

#[test]
fn test_self_recursion_hits_depth_limit() {
    let recursive = Arc::new(compile(&PARENT.replace("child.yaml", "self")));
    let target = recursive.clone();
    let resolver = move |_key: &str| -> Result<Arc<CompiledDecision>> { Ok(target.clone()) };

    let err = GraphExecutor::new()
        .with_resolver(Arc::new(resolver))
        .evaluate(&recursive, json!({}).into(), &EvaluationOptions::new(false, 10))
        .unwrap_err();

    assert!(matches!(err.root_cause(), RuntimeError::DepthExceeded { max_depth: 10 }));
    let message = err.to_string();
    assert!(message.contains("Depth limit exceeded"));
    assert_eq!(message.matches("Node 'child' failed").count(), 1, "{}", message);
}

const ECHO_ITERATION: &str = r#"
nodes:
  - { id: in, type: inputNode }
  - id: echo
    type: customNode
    content: { component: echo, config: {} }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: echo }
  - { sourceId: echo, targetId: out }
"#;

#[test]
fn test_custom_node_sees_iteration() {
    let echo = Arc::new(compile(ECHO_ITERATION));
    let target = echo.clone();
    let resolver = move |_key: &str| -> Result<Arc<CompiledDecision>> { Ok(target.clone()) };
    let handler = |request: NodeRequest| -> anyhow::Result<NodeResponse> {
        Ok(NodeResponse::from_serializable(&json!({ "iteration": request.iteration }))?)
    };
    let executor = GraphExecutor::new()
        .with_resolver(Arc::new(resolver))
        .with_custom_handler(Arc::new(handler));
    let options = EvaluationOptions::new(false, 2);

    let top_level = executor.evaluate(&echo, json!({}).into(), &options).unwrap();
    assert_eq!(top_level.result, Value::from(json!({"iteration": 0})));

    let parent = compile(&PARENT.replace("child.yaml", "echo.yaml"));
    let nested = executor.evaluate(&parent, json!({}).into(), &options).unwrap();
    assert_eq!(nested.result, Value::from(json!({"iteration": 1})));
}

#[test]
fn test_unresolvable_sub_decision() {
    let decision = compile(&PARENT.replace("child.yaml", "missing.yaml"));
    let err = GraphExecutor::new()
        .with_resolver(resolver())
        .evaluate(&decision, json!({}).into(), &EvaluationOptions::new(false, 3))
        .unwrap_err();

    match err.root_cause() {
        RuntimeError::Resolution { key, message } => {
            assert_eq!(key, "missing.yaml");
            assert_eq!(message, "not found");
        }
        other => panic!("Expected resolution error, got {:?}", other),
    }
}

#[test]
fn test_concurrent_evaluations_are_isolated() {
    let decision = Arc::new(compile(
        r#"
nodes:
  - { id: in, type: inputNode }
  - { id: fn, type: functionNode, content: "{ output: input * 2 }" }
  - { id: out, type: outputNode }
edges:
  - { sourceId: in, targetId: fn }
  - { sourceId: fn, targetId: out }
"#,
    ));
    let executor = GraphExecutor::new();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let decision = decision.clone();
            let executor = &executor;
            scope.spawn(move || {
                for j in 0..50 {
                    let n = i * 100 + j;
                    let result = executor
                        .evaluate(&decision, json!({"input": n}).into(), &EvaluationOptions::default())
                        .unwrap();
                    assert_eq!(result.result, Value::from(json!({"output": n * 2})));
                }
            });
        }
    });
}
