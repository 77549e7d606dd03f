//! Configuration management for the tool servers.
//! This module handles parsing, interpolation, environment overrides, and
//! validation of the ~/.config/relo/mcp.json configuration file.

mod interpolation;
mod io;
mod model;
mod validation;

pub use interpolation::{InterpolationError, interpolate_config};
pub use io::{CONFIG_PATH_ENV, default_config_path, expand_tilde, load_config, load_config_from_path};
pub use model::{ConfigError, ServerConfig};
pub use validation::{ValidationError, validate_config, validate_tool_name};
