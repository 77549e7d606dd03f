use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business domain served by a single tool server process.
///
/// Exactly one domain is bound per process; the selector strings returned by
/// [`DomainKind::as_str`] are the accepted launch arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    /// Move lifecycle: creation, lookup, status updates.
    Moves,
    /// Temporary and permanent housing options.
    Housing,
    /// Vendor services attached to a move (flights, shipping, storage).
    Services,
    /// Invoices and payment state.
    Financial,
    /// Employers, employees and dashboard roll-ups.
    Operations,
}

impl DomainKind {
    /// Every domain, in launch-help order.
    pub const ALL: [DomainKind; 5] = [
        DomainKind::Moves,
        DomainKind::Housing,
        DomainKind::Services,
        DomainKind::Financial,
        DomainKind::Operations,
    ];

    /// Canonical selector string for this domain.
    pub const fn as_str(self) -> &'static str {
        match self {
            DomainKind::Moves => "moves",
            DomainKind::Housing => "housing",
            DomainKind::Services => "services",
            DomainKind::Financial => "financial",
            DomainKind::Operations => "operations",
        }
    }

    /// Name advertised by the tool server for this domain.
    pub fn server_name(self) -> String {
        format!("relo-{}", self.as_str())
    }

    /// Comma-separated list of valid selectors, used in error output.
    pub fn selectors() -> String {
        DomainKind::ALL.iter().map(|kind| kind.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a launch selector does not name a known domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown domain '{value}'; valid selectors: {}", DomainKind::selectors())]
pub struct ParseDomainError {
    pub value: String,
}

impl FromStr for DomainKind {
    type Err = ParseDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DomainKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ParseDomainError { value: value.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_canonical_selector() {
        for kind in DomainKind::ALL {
            assert_eq!(kind.as_str().parse::<DomainKind>(), Ok(kind));
        }
    }

    #[test]
    fn selector_parsing_is_case_sensitive() {
        assert!("Moves".parse::<DomainKind>().is_err());
        assert!(" moves".parse::<DomainKind>().is_err());
    }

    #[test]
    fn parse_error_lists_valid_selectors() {
        let error = "bogus".parse::<DomainKind>().expect_err("bogus is not a domain");
        let message = error.to_string();
        assert!(message.contains("'bogus'"), "message: {message}");
        assert!(message.contains("moves, housing, services, financial, operations"), "message: {message}");
    }

    #[test]
    fn server_name_is_prefixed() {
        assert_eq!(DomainKind::Financial.server_name(), "relo-financial");
    }
}
