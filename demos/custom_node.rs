//! Custom node example
//!
//! A host component plugs into the graph through a CustomNodeRegistry.
//! Config strings containing `{{ }}` are rendered against the node input
//! before the handler reads them.

use serde_json::json;
use std::collections::HashMap;
use verdict_demos::init_tracing;
use verdict_sdk::{CustomNodeRegistry, DecisionEngine, NodeRequest, NodeResponse};

const DOCUMENT: &str = r#"
nodes:
  - id: request
    name: Request
    type: inputNode
  - id: greeting
    name: Greeting
    type: customNode
    content:
      component: greeter
      config:
        message: "Hello {{ user.name }}, you have {{ len(user.orders) }} orders"
        loud: "{{ user.vip }}"
  - id: response
    name: Response
    type: outputNode
edges:
  - sourceId: request
    targetId: greeting
  - sourceId: greeting
    targetId: response
"#;

fn greeter(request: NodeRequest) -> anyhow::Result<NodeResponse> {
    let message: String = request.get_field("message")?;
    let loud: bool = request.get_field("loud")?;

    let message = if loud { message.to_uppercase() } else { message };

    let mut output = HashMap::new();
    output.insert("greeting", message);
    Ok(NodeResponse::from_serializable(&output)?.with_trace_data(json!({ "loud": loud }).into()))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    println!("=== Custom Node Example ===\n");

    let engine = DecisionEngine::builder()
        .with_custom_handler(CustomNodeRegistry::new().with("greeter", greeter))
        .build();

    let decision = engine.create_decision(DOCUMENT)?;

    for user in [
        json!({ "name": "Ada", "orders": [1, 2, 3], "vip": false }),
        json!({ "name": "Grace", "orders": [], "vip": true }),
    ] {
        let response = decision.evaluate(&json!({ "user": user }))?;
        println!("{}", response.result);
    }

    Ok(())
}
