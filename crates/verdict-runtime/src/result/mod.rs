//! Evaluation results and trace

pub(crate) mod response;
mod trace;

pub use response::EvaluationResponse;
pub use trace::NodeTrace;
