//! Configuration loader for GauchoChat.
//!
//! Reads `config.toml` from the data directory (`~/.gaucho/` in production)
//! and deserializes it into [`OpenerConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use gaucho_types::config::OpenerConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GAUCHO_DATA_DIR";

/// Resolve the data directory: `$GAUCHO_DATA_DIR`, else `~/.gaucho`.
///
/// Falls back to `./.gaucho` when no home directory can be determined.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gaucho"),
    }
}

/// Load opener configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`OpenerConfig::default()`].
/// - Unreadable or unparsable file: a warning is logged and the default is returned.
pub async fn load_opener_config(data_dir: &Path) -> OpenerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return OpenerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return OpenerConfig::default();
        }
    };

    match toml::from_str::<OpenerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            OpenerConfig::default()
        }
    }
}
