//! OpenRouter connection settings from TOML (`[openrouter]` section)

use crate::openrouter::{API_KEY_ENV, DEFAULT_API_URL, OpenRouterSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw OpenRouter configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    pub api_url: String,
    /// API key; falls back to `OPENROUTER_API_KEY` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub max_idle_connections: usize,
    pub connect_timeout_secs: f64,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            max_idle_connections: 20,
            connect_timeout_secs: 10.0,
        }
    }
}

impl FileOpenRouterConfig {
    /// Configured key, else the environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }

    pub fn to_settings(&self) -> OpenRouterSettings {
        let defaults = OpenRouterSettings::default();
        OpenRouterSettings {
            api_url: self.api_url.clone(),
            api_key: self.resolve_api_key(),
            max_idle_connections: self.max_idle_connections,
            connect_timeout: Duration::try_from_secs_f64(self.connect_timeout_secs)
                .unwrap_or(defaults.connect_timeout),
        }
    }
}
