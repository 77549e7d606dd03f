//! Configuration validation for tool servers.

use once_cell::sync::Lazy;
use regex::Regex;
use relo_types::WidgetKey;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ServerConfig;

static TOOL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_.-]+$").expect("tool name regex should compile"));

/// Validate the whole configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), ValidationError> {
    if let Some(api_base) = &config.api_base {
        validate_api_base(api_base)?;
    }
    if config.timeout_secs == Some(0) {
        return Err(ValidationError::InvalidTimeout);
    }
    for (tool_name, widget) in &config.widgets {
        validate_tool_name(tool_name)?;
        validate_widget_key(tool_name, widget)?;
        debug!("Validated widget mapping: {} -> {}", tool_name, widget);
    }
    Ok(())
}

/// Validate the API base URL's shape.
///
/// The client applies the stricter https rule when it is built; this only
/// rejects values that could never work.
fn validate_api_base(api_base: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(api_base).map_err(|error| ValidationError::InvalidApiBase {
        value: api_base.to_string(),
        reason: error.to_string(),
    })?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ValidationError::InvalidApiBase {
            value: api_base.to_string(),
            reason: format!("unsupported URL scheme: {} (expected http/https)", scheme),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidApiBase {
            value: api_base.to_string(),
            reason: "URL must include a host".to_string(),
        });
    }
    Ok(())
}

/// Validate a tool name used as a widget mapping key.
pub fn validate_tool_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidToolName {
            name: name.to_string(),
            reason: "Tool name cannot be empty".to_string(),
        });
    }

    if !TOOL_NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidToolName {
            name: name.to_string(),
            reason: "Tool name must contain only lowercase letters, numbers, dots, underscores, and hyphens".to_string(),
        });
    }

    Ok(())
}

fn validate_widget_key(tool_name: &str, widget: &str) -> Result<(), ValidationError> {
    widget
        .parse::<WidgetKey>()
        .map(|_| ())
        .map_err(|_| ValidationError::UnknownWidget {
            tool_name: tool_name.to_string(),
            widget: widget.to_string(),
        })
}

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base '{value}': {reason}")]
    InvalidApiBase { value: String, reason: String },

    #[error("timeoutSecs must be greater than zero")]
    InvalidTimeout,

    #[error("Invalid tool name '{name}': {reason}")]
    InvalidToolName { name: String, reason: String },

    #[error("Unknown widget '{widget}' for tool '{tool_name}'")]
    UnknownWidget { tool_name: String, widget: String },
}
