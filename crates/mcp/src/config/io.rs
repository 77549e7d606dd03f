//! Configuration IO helpers for the tool servers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use tracing::debug;

use crate::config::{ConfigError, ServerConfig, interpolate_config, validate_config};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "RELO_CONFIG_PATH";

/// Returns the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("relo").join("mcp.json")
}

/// Loads configuration from the default path.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    let path = default_config_path();
    load_config_from_path(&path)
}

/// Loads configuration from a specific path.
///
/// A missing file is not an error: the defaults plus environment overrides
/// are used instead. Environment overrides are applied after interpolation
/// and before validation.
pub fn load_config_from_path(path: &Path) -> Result<ServerConfig, ConfigError> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut config: ServerConfig = serde_json::from_str(&content)?;
        interpolate_config(&mut config)?;
        debug!(path = %path.display(), "loaded configuration file");
        config
    } else {
        debug!(path = %path.display(), "no configuration file; using defaults");
        ServerConfig::default()
    };

    config.apply_env_overrides();
    validate_config(&config)?;
    Ok(config)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relo_api::{API_BASE_ENV, API_KEY_ENV};
    use std::io::Write;

    fn without_api_env<R>(closure: impl FnOnce() -> R) -> R {
        temp_env::with_vars([(API_BASE_ENV, None::<&str>), (API_KEY_ENV, None::<&str>)], closure)
    }

    #[test]
    fn default_path_honors_environment_override() {
        let override_path = "~/custom/relo/mcp.json";
        temp_env::with_var(CONFIG_PATH_ENV, Some(override_path), || {
            let path = default_config_path();
            let expected = expand_tilde(override_path);
            assert_eq!(path, expected);
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        without_api_env(|| {
            let directory = tempfile::tempdir().expect("tempdir");
            let config = load_config_from_path(&directory.path().join("absent.json")).expect("defaults");
            assert_eq!(config, ServerConfig::default());
        });
    }

    #[test]
    fn loads_and_interpolates_file() {
        temp_env::with_vars(
            [
                (API_BASE_ENV, None::<&str>),
                (API_KEY_ENV, None::<&str>),
                ("RELO_FILE_TOKEN", Some("from-env")),
            ],
            || {
                let mut file = tempfile::NamedTempFile::new().expect("temp file");
                write!(
                    file,
                    r#"{{"apiBase":"https://relo.example.com/api/trpc","apiKey":"${{env:RELO_FILE_TOKEN}}","timeoutSecs":10}}"#
                )
                .expect("write config");

                let config = load_config_from_path(file.path()).expect("load config");
                assert_eq!(config.api_base.as_deref(), Some("https://relo.example.com/api/trpc"));
                assert_eq!(config.api_key.as_deref(), Some("from-env"));
                assert_eq!(config.timeout_secs, Some(10));
            },
        );
    }

    #[test]
    fn environment_wins_over_file() {
        temp_env::with_vars([(API_BASE_ENV, None::<&str>), (API_KEY_ENV, Some("env-token"))], || {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            write!(file, r#"{{"apiKey":"file-token"}}"#).expect("write config");
            let config = load_config_from_path(file.path()).expect("load config");
            assert_eq!(config.api_key.as_deref(), Some("env-token"));
        });
    }

    #[test]
    fn invalid_file_is_an_error() {
        without_api_env(|| {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            write!(file, r#"{{"apiBase":"ftp://relo.example.com"}}"#).expect("write config");
            assert!(matches!(load_config_from_path(file.path()), Err(ConfigError::Validation(_))));

            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            write!(file, "not json").expect("write config");
            assert!(matches!(load_config_from_path(file.path()), Err(ConfigError::Json(_))));
        });
    }
}
