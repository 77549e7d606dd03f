//! Data models for tool server configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use indexmap::IndexMap;
use relo_api::{API_BASE_ENV, API_KEY_ENV, ClientSettings, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use relo_types::WidgetKey;
use relo_widgets::WidgetRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{InterpolationError, ValidationError};

/// Configuration shared by every domain server.
///
/// Every field is optional in the file; environment variables take
/// precedence over file values for the API base and key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the relocation tRPC API (e.g. `https://relo.example.com/api/trpc`).
    pub api_base: Option<String>,

    /// API token. Supports `${env:NAME}` interpolation.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Extra or replacement tool-name to widget-key mappings.
    #[serde(default)]
    pub widgets: IndexMap<String, String>,
}

impl ServerConfig {
    /// Replace file values with `RELO_API_BASE` / `RELO_API_KEY` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(api_base) = non_empty_env(API_BASE_ENV) {
            self.api_base = Some(api_base);
        }
        if let Some(api_key) = non_empty_env(API_KEY_ENV) {
            self.api_key = Some(api_key);
        }
    }

    /// Settings for building the API client.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base.clone().unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: self.api_key.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Default widget table extended with this configuration's overrides.
    pub fn widget_registry(&self) -> Result<WidgetRegistry, ConfigError> {
        let overrides = self
            .widgets
            .iter()
            .map(|(tool_name, widget)| {
                WidgetKey::from_str(widget)
                    .map(|key| (tool_name.clone(), key))
                    .map_err(|error| ConfigError::Invalid {
                        message: format!("widget for tool '{tool_name}': {error}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WidgetRegistry::with_defaults().with_overrides(overrides))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    Invalid { message: String },
}
