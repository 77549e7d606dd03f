//! Shared type definitions for the Relo tool servers and widget layer.
//!
//! These types are deliberately free of transport and HTTP concerns so the
//! widget crate, the API client, and the MCP servers can all agree on the
//! same closed sets of domains and widget keys.

mod domain;
mod widget;

pub use domain::{DomainKind, ParseDomainError};
pub use widget::{ParseWidgetKeyError, WidgetKey};
