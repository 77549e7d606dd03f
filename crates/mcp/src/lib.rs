//! Model Context Protocol (MCP) tool servers for the Relo relocation platform.
//!
//! Each process serves exactly one business domain (moves, housing, services,
//! financial or operations) over stdio. Tool calls are forwarded to the
//! relocation API and their JSON results returned as text; the same text is
//! classified for the chat UI's widgets and the outcome logged.

pub mod config;
pub mod launch;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use launch::{LaunchError, LaunchState, Launcher, run};
pub use server::{DomainServer, ToolContext};
