//! Application state wiring the opener service together.
//!
//! AppState holds the resolved data directory and configuration; the
//! opener service is built from it on demand so CLI overrides apply.

use std::path::PathBuf;

use gaucho_core::opener::fallback::FallbackSelector;
use gaucho_core::opener::filter::ResponseFilter;
use gaucho_core::opener::service::OpenerService;
use gaucho_infra::config::{load_opener_config, resolve_data_dir};
use gaucho_infra::llm::create_provider;
use gaucho_types::config::OpenerConfig;

/// Backend settings given on the command line, applied over `config.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendOverrides {
    pub controller: Option<String>,
    pub worker: Option<String>,
    pub model: Option<String>,
    pub max_new_tokens: Option<u32>,
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: OpenerConfig,
}

impl AppState {
    /// Resolve the data directory and load `config.toml` from it.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_opener_config(&data_dir).await;
        tracing::debug!(
            data_dir = %data_dir.display(),
            controller = %config.controller_address,
            model = %config.model_name,
            "loaded opener config"
        );
        Ok(Self { data_dir, config })
    }

    /// Apply command-line overrides to the loaded configuration.
    pub fn apply_overrides(&mut self, overrides: BackendOverrides) {
        if let Some(controller) = overrides.controller {
            self.config.controller_address = controller;
        }
        if let Some(worker) = overrides.worker {
            self.config.worker_address = Some(worker);
        }
        if let Some(model) = overrides.model {
            self.config.model_name = model;
        }
        if let Some(max_new_tokens) = overrides.max_new_tokens {
            self.config.max_new_tokens = max_new_tokens;
        }
    }

    /// Build an opener service from the current configuration.
    ///
    /// `seed` makes the fallback choice reproducible.
    pub fn opener_service(&self, seed: Option<u64>) -> anyhow::Result<OpenerService> {
        let provider = create_provider(&self.config)?;
        let openers = self.config.fallback_openers.clone();
        let fallback = match seed {
            Some(seed) => FallbackSelector::seeded(openers, seed),
            None => FallbackSelector::from_os_rng(openers),
        };
        Ok(OpenerService::new(
            self.config.clone(),
            provider,
            ResponseFilter::default(),
            fallback,
        ))
    }
}
