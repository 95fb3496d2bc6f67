//! Decision table example
//!
//! This example demonstrates:
//! - Loading a decision from a directory with FilesystemLoader
//! - Evaluating a first-hit decision table
//! - Reading the per-node trace

use serde_json::json;
use verdict_demos::{decisions_dir, init_tracing};
use verdict_sdk::{DecisionEngine, FilesystemLoader};

fn main() -> anyhow::Result<()> {
    init_tracing();
    println!("=== Decision Table Example ===\n");

    let engine = DecisionEngine::builder()
        .with_loader(FilesystemLoader::new(decisions_dir())?)
        .trace(true)
        .build();

    let orders = [
        json!({ "customer": { "country": "US" }, "order": { "weight": 2 } }),
        json!({ "customer": { "country": "US" }, "order": { "weight": 12.5 } }),
        json!({ "customer": { "country": "DE" }, "order": { "weight": 3 } }),
    ];

    for order in &orders {
        let response = engine.evaluate("shipping.json", order)?;
        println!("Order:  {}", order);
        println!("Result: {}", response.result);
        println!("Time:   {}", response.performance);

        for node in response.trace.iter().flatten() {
            if let Some(data) = &node.trace_data {
                println!("  {} matched {}", node.name, data);
            }
        }
        println!();
    }

    Ok(())
}
