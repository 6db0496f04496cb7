pub mod init;
mod schema;
pub mod validation;

pub use schema::{Config, ThemeMode, DEFAULT_QUERY_LIMIT, DEFAULT_TICK_RATE_MS};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Overrides the store file path
pub const ENV_STORE: &str = "EXOHAB_STORE";

/// Overrides the listing row limit
pub const ENV_QUERY_LIMIT: &str = "EXOHAB_QUERY_LIMIT";

/// Get the config directory path (~/.config/exohab/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("exohab")
}

/// Get the default config file path (~/.config/exohab/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file, then apply environment overrides
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/exohab/config.yaml), and a missing default file yields the
///   built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - An environment override is malformed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    let config = if config_path.exists() {
        let config_content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read config file at {}", config_path.display())
        })?;
        let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
            format!("Failed to parse config: invalid YAML in {}", config_path.display())
        })?;
        tracing::debug!(path = %config_path.display(), "config loaded");
        config
    } else if explicit {
        anyhow::bail!("Config file not found at {}", config_path.display());
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        Config::default()
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `EXOHAB_*` overrides using the given variable lookup
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(store) = lookup(ENV_STORE).filter(|s| !s.trim().is_empty()) {
        tracing::debug!(store = %store, "store path overridden from environment");
        config.store_path = Some(PathBuf::from(store.trim()));
    }

    if let Some(limit) = lookup(ENV_QUERY_LIMIT) {
        config.query_limit = limit
            .trim()
            .parse()
            .with_context(|| format!("{} must be a whole number, got '{}'", ENV_QUERY_LIMIT, limit))?;
    }

    Ok(config)
}

/// The store file this configuration points at
pub fn resolve_store_path(config: &Config) -> PathBuf {
    config
        .store_path
        .clone()
        .unwrap_or_else(crate::store::get_store_path)
}
