use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_QUERY_LIMIT: usize = 500;
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// store_path: /srv/exohab/planets.json
/// query_limit: 200
/// theme: dark
/// tick_rate_ms: 250
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store file (default: ~/.config/exohab/planets.json)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Maximum rows returned by listings
    #[serde(default = "default_query_limit")]
    pub query_limit: usize,

    /// Dashboard color theme
    #[serde(default)]
    pub theme: ThemeMode,

    /// Dashboard redraw interval
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            query_limit: DEFAULT_QUERY_LIMIT,
            theme: ThemeMode::Auto,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

fn default_query_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

fn default_tick_rate_ms() -> u64 {
    DEFAULT_TICK_RATE_MS
}
