//! Controller/worker wire types.
//!
//! These mirror the JSON bodies of the model-serving controller and its
//! workers. They are NOT the generic request type from gaucho-types --
//! that one is backend-agnostic.

use serde::{Deserialize, Serialize};

/// Body of `POST {controller}/get_worker_address`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerAddressRequest<'a> {
    pub model: &'a str,
}

/// Controller answer; an empty address means no worker serves the model.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerAddressResponse {
    pub address: String,
}

/// Body of `POST {worker}/worker_generate_stream`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub stop: &'a str,
    pub echo: bool,
}

/// One NUL-terminated chunk of the worker's streamed answer.
///
/// Each chunk carries the full text generated so far.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerChunk {
    pub text: String,
    #[serde(default)]
    pub error_code: i64,
}
