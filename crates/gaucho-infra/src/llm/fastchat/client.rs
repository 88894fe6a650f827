//! FastChatProvider -- concrete [`LlmProvider`] for a controller/worker
//! model-serving stack.
//!
//! One `generate` call is at most two HTTP requests: a worker lookup at the
//! controller (skipped when the request names a worker) and the generation
//! call itself. Nothing is retried.

use std::time::Duration;

use tracing::{Instrument, info_span};

use gaucho_core::llm::provider::LlmProvider;
use gaucho_observe::genai_attrs::{OP_RESOLVE_WORKER, OP_TEXT_COMPLETION, PROVIDER_FASTCHAT};
use gaucho_types::llm::{GenerationRequest, LlmError};

use super::types::{WorkerAddressRequest, WorkerAddressResponse, WorkerChunk, WorkerGenerateRequest};

/// Text-generation client for a controller/worker serving stack.
pub struct FastChatProvider {
    client: reqwest::Client,
    temperature: f32,
}

impl FastChatProvider {
    /// Create a provider whose HTTP calls time out after `timeout`.
    pub fn new(temperature: f32, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            temperature,
        })
    }

    fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    /// Ask the controller which worker serves `model`.
    async fn resolve_worker(&self, controller: &str, model: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(Self::url(controller, "/get_worker_address"))
            .json(&WorkerAddressRequest { model })
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("controller request failed: {e}"),
            })?;

        let response = check_status(response).await?;
        let body: WorkerAddressResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse worker address: {e}"))
        })?;

        if body.address.is_empty() {
            return Err(LlmError::NoWorker(model.to_string()));
        }
        tracing::debug!(worker = %body.address, "resolved worker");
        Ok(body.address)
    }

    async fn generate_on_worker(
        &self,
        worker: &str,
        request: &GenerationRequest,
    ) -> Result<String, LlmError> {
        let body = WorkerGenerateRequest {
            model: &request.model_name,
            prompt: &request.prompt,
            temperature: self.temperature,
            max_new_tokens: request.max_new_tokens,
            stop: &request.stop_token,
            echo: false,
        };

        let response = self
            .client
            .post(Self::url(worker, "/worker_generate_stream"))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("worker request failed: {e}"),
            })?;

        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(|e| LlmError::Provider {
            message: format!("failed to read worker response: {e}"),
        })?;

        let chunk = parse_final_chunk(&bytes)?;
        if chunk.error_code != 0 {
            return Err(LlmError::Generation {
                code: chunk.error_code,
                message: chunk.text,
            });
        }
        Ok(chunk.text)
    }
}

impl LlmProvider for FastChatProvider {
    fn name(&self) -> &str {
        PROVIDER_FASTCHAT
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        if request.prompt.is_empty() {
            return Err(LlmError::InvalidRequest("prompt is empty".to_string()));
        }

        let worker = match request.worker_address.as_deref() {
            Some(worker) if !worker.is_empty() => worker.to_string(),
            _ => {
                let span = info_span!(
                    "gen_ai.resolve_worker",
                    gen_ai.operation.name = OP_RESOLVE_WORKER,
                    gen_ai.provider.name = PROVIDER_FASTCHAT,
                    gen_ai.request.model = %request.model_name,
                );
                self.resolve_worker(&request.controller_address, &request.model_name)
                    .instrument(span)
                    .await?
            }
        };

        let span = info_span!(
            "gen_ai.text_completion",
            gen_ai.operation.name = OP_TEXT_COMPLETION,
            gen_ai.provider.name = PROVIDER_FASTCHAT,
            gen_ai.request.model = %request.model_name,
            gen_ai.request.max_tokens = request.max_new_tokens,
            gen_ai.request.temperature = self.temperature,
        );
        self.generate_on_worker(&worker, request)
            .instrument(span)
            .await
    }
}

/// Map non-success statuses to errors, keeping the body for diagnostics.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_body = response.text().await.unwrap_or_default();
    Err(LlmError::Provider {
        message: format!("HTTP {status}: {error_body}"),
    })
}

/// Parse the last non-empty chunk of a NUL-delimited worker stream.
pub(crate) fn parse_final_chunk(body: &[u8]) -> Result<WorkerChunk, LlmError> {
    let last = body
        .split(|&b| b == 0)
        .filter(|chunk| !chunk.iter().all(u8::is_ascii_whitespace))
        .next_back()
        .ok_or_else(|| LlmError::Deserialization("worker returned no output".to_string()))?;

    serde_json::from_slice(last)
        .map_err(|e| LlmError::Deserialization(format!("invalid worker chunk: {e}")))
}
