//! Sub-decision example
//!
//! `checkout.json` calls `risk.json` through a decisionNode. The depth
//! limit counts the top-level graph, so one level of nesting needs a
//! max depth of at least 2.

use serde_json::json;
use verdict_demos::{decisions_dir, init_tracing};
use verdict_sdk::{DecisionEngine, EvaluationOptions, FilesystemLoader};

fn main() -> anyhow::Result<()> {
    init_tracing();
    println!("=== Sub-decision Example ===\n");

    let engine = DecisionEngine::builder()
        .with_loader(FilesystemLoader::new(decisions_dir())?)
        .cache_decisions(true)
        .max_depth(2)
        .build();

    for payment in [
        json!({ "amount": 250, "country": "US" }),
        json!({ "amount": 4000, "country": "US" }),
        json!({ "amount": 4000, "country": "BR" }),
    ] {
        let response = engine.evaluate("checkout.json", &payment)?;
        println!("{} -> {}", payment, response.result);
    }
    tracing::info!(cached = engine.cached_decisions(), "decision cache populated");

    // With a single level allowed the nested call is refused
    match engine.evaluate_with_options("checkout.json", &json!({ "amount": 1 }), EvaluationOptions::new(false, 1)) {
        Ok(response) => println!("Unexpected result: {}", response.result),
        Err(e) => tracing::warn!(error = %e, "nested call refused at depth 1"),
    }

    Ok(())
}
