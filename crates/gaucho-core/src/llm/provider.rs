//! LlmProvider trait definition.
//!
//! This is the seam between the opener pipeline and the model-serving
//! backend. Uses RPITIT for `generate`; see [`super::box_provider`] for the
//! object-safe wrapper.

use gaucho_types::llm::{GenerationRequest, LlmError};

/// Trait for text-generation backends.
///
/// Implementations live in gaucho-infra (e.g., `FastChatProvider`). A
/// provider performs exactly one backend call per `generate` and never
/// retries; retry policy, if any, belongs to the caller.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "fastchat").
    fn name(&self) -> &str;

    /// Send the prompt and return the raw text completion.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
