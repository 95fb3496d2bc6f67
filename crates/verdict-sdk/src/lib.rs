//! Verdict Decision Engine SDK
//!
//! High-level API for loading, compiling and evaluating decision graphs.
//!
//! ```no_run
//! use serde_json::json;
//! use verdict_sdk::{DecisionEngine, FilesystemLoader};
//!
//! let engine = DecisionEngine::builder()
//!     .with_loader(FilesystemLoader::new("decisions").unwrap())
//!     .build();
//! let response = engine.evaluate("pricing.json", &json!({"input": 15})).unwrap();
//! println!("{}", response.result);
//! ```

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
pub mod expression;
pub mod loader;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::{Decision, DecisionEngine};
pub use error::{Result, SdkError};
pub use expression::{evaluate_expression, evaluate_unary_expression, render_template};
pub use loader::{DecisionLoader, FilesystemLoader, MemoryLoader};

// Re-export commonly used types from dependencies
pub use verdict_core::{CompiledDecision, Value};
pub use verdict_runtime::{
    CustomNode, CustomNodeHandler, CustomNodeRegistry, EvaluationOptions, EvaluationResponse,
    NodeRequest, NodeResponse, NodeTrace, RuntimeError,
};
