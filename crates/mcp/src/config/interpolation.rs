//! Configuration interpolation for environment variables.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::ServerConfig;

static ENV_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{env:([\w-]*)}").expect("env placeholder regex should compile"));

/// Interpolate `${env:NAME}` placeholders in the API base and key.
pub fn interpolate_config(config: &mut ServerConfig) -> Result<(), InterpolationError> {
    if let Some(api_base) = &mut config.api_base {
        *api_base = interpolate_string(api_base)?;
    }
    if let Some(api_key) = &mut config.api_key {
        *api_key = interpolate_string(api_key)?;
    }
    Ok(())
}

/// Replace every `${env:NAME}` in `value` with the variable's value.
fn interpolate_string(value: &str) -> Result<String, InterpolationError> {
    let mut resolved = Vec::new();
    for capture in ENV_PLACEHOLDER.captures_iter(value) {
        let var_name = capture[1].to_string();
        let env_value = std::env::var(&var_name).map_err(|_| InterpolationError::MissingEnvVar { name: var_name.clone() })?;
        debug!("Interpolated env var: {} -> [REDACTED]", var_name);
        resolved.push((capture[0].to_string(), env_value));
    }

    let mut result = value.to_string();
    for (placeholder, env_value) in resolved {
        result = result.replace(&placeholder, &env_value);
    }
    Ok(result)
}

/// Errors that can occur during interpolation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: String },
}
