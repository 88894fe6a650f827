//! Opener configuration.
//!
//! `OpenerConfig` represents the `config.toml` that points the opener
//! pipeline at a model-serving backend and supplies the system preamble.

use serde::{Deserialize, Serialize};

/// Configuration consumed by the opener pipeline.
///
/// Loaded from `~/.gaucho/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenerConfig {
    /// System preamble placed at the top of every opener prompt.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Address of the model-serving controller.
    #[serde(default = "default_controller_address")]
    pub controller_address: String,

    /// Worker to use directly, bypassing the controller lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_address: Option<String>,

    /// Model served by the backend.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Upper bound on generated tokens per opener.
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Sampling temperature sent to the worker.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP timeout for a single backend call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Replaces the built-in fallback openers when non-empty.
    #[serde(default)]
    pub fallback_openers: Vec<String>,
}

fn default_system_prompt() -> String {
    "A chat between a curious human and an imaginative artificial intelligence assistant. \
     The assistant opens the conversation with a warm, playful question that invites the \
     human to share something about themselves."
        .to_string()
}

fn default_controller_address() -> String {
    "http://localhost:21001".to_string()
}

fn default_model_name() -> String {
    "vicuna-13b".to_string()
}

fn default_max_new_tokens() -> u32 {
    64
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for OpenerConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            controller_address: default_controller_address(),
            worker_address: None,
            model_name: default_model_name(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_openers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_config_default_values() {
        let config = OpenerConfig::default();
        assert_eq!(config.controller_address, "http://localhost:21001");
        assert_eq!(config.model_name, "vicuna-13b");
        assert_eq!(config.max_new_tokens, 64);
        assert!(config.worker_address.is_none());
        assert!(config.fallback_openers.is_empty());
    }

    #[test]
    fn test_opener_config_deserialize_with_defaults() {
        let config: OpenerConfig = toml::from_str("").unwrap();
        assert_eq!(config, OpenerConfig::default());
    }

    #[test]
    fn test_opener_config_deserialize_with_values() {
        let toml_str = r#"
system_prompt = "Be curious."
controller_address = "http://gpu-box:21001"
model_name = "vicuna-7b"
max_new_tokens = 32
fallback_openers = ["What's your favourite season?"]
"#;
        let config: OpenerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.system_prompt, "Be curious.");
        assert_eq!(config.controller_address, "http://gpu-box:21001");
        assert_eq!(config.model_name, "vicuna-7b");
        assert_eq!(config.max_new_tokens, 32);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.fallback_openers.len(), 1);
    }
}
