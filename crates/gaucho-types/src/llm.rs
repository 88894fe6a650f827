//! Request and error types for the text-generation backend.
//!
//! The backend is a controller/worker model-serving stack: the controller
//! hands out worker addresses, workers run the model.

use serde::{Deserialize, Serialize};

/// A single generation request.
///
/// Built once per opener and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub stop_token: String,
    pub controller_address: String,
    /// Skip the controller lookup and talk to this worker directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_address: Option<String>,
    pub model_name: String,
    pub max_new_tokens: u32,
}

/// Errors from the text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("no worker available for model '{0}'")]
    NoWorker(String),

    #[error("generation failed (error code {code}): {message}")]
    Generation { code: i64, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
