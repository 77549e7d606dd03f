use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UI render mode selected for a tool result.
///
/// The set is closed; a tool without a widget renders as plain text, which is
/// represented by the absence of a key rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKey {
    /// A single move together with its employee and employer.
    MoveDetail,
    MoveList,
    HousingList,
    InvoiceList,
    ServiceList,
}

impl WidgetKey {
    pub const ALL: [WidgetKey; 5] = [
        WidgetKey::MoveDetail,
        WidgetKey::MoveList,
        WidgetKey::HousingList,
        WidgetKey::InvoiceList,
        WidgetKey::ServiceList,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WidgetKey::MoveDetail => "move-detail",
            WidgetKey::MoveList => "move-list",
            WidgetKey::HousingList => "housing-list",
            WidgetKey::InvoiceList => "invoice-list",
            WidgetKey::ServiceList => "service-list",
        }
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget key '{value}'")]
pub struct ParseWidgetKeyError {
    pub value: String,
}

impl FromStr for WidgetKey {
    type Err = ParseWidgetKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WidgetKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| ParseWidgetKeyError { value: value.to_string() })
    }
}
