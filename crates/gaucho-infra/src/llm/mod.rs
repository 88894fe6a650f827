//! Text-generation backend implementations.
//!
//! Contains the concrete [`LlmProvider`](gaucho_core::llm::provider::LlmProvider)
//! for the controller/worker serving stack, plus a factory
//! ([`create_provider`]) that builds it from an [`OpenerConfig`].

pub mod fastchat;

use std::time::Duration;

use gaucho_core::llm::box_provider::BoxLlmProvider;
use gaucho_types::config::OpenerConfig;
use gaucho_types::llm::LlmError;

use self::fastchat::FastChatProvider;

/// Create a [`BoxLlmProvider`] from an [`OpenerConfig`].
///
/// # Errors
///
/// Returns an error if the temperature is out of range or the HTTP client
/// cannot be built.
pub fn create_provider(config: &OpenerConfig) -> Result<BoxLlmProvider, LlmError> {
    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(LlmError::InvalidRequest(format!(
            "temperature {} is outside 0.0..=2.0",
            config.temperature
        )));
    }
    let timeout = Duration::from_secs(config.request_timeout_secs.max(1));
    let provider = FastChatProvider::new(config.temperature, timeout)?;
    Ok(BoxLlmProvider::new(provider))
}
