//! Tool name to widget key lookup.

use indexmap::IndexMap;
use relo_types::WidgetKey;

/// Built-in mappings for the relocation tool sets.
const DEFAULT_MAPPINGS: &[(&str, WidgetKey)] = &[
    ("get_move", WidgetKey::MoveDetail),
    ("create_move", WidgetKey::MoveDetail),
    ("create_test_move", WidgetKey::MoveDetail),
    ("list_moves", WidgetKey::MoveList),
    ("list_housing_options", WidgetKey::HousingList),
    ("search_housing", WidgetKey::HousingList),
    ("list_invoices", WidgetKey::InvoiceList),
    ("list_services", WidgetKey::ServiceList),
];

/// Immutable table of which tools render as which widget.
///
/// Lookups are exact and case-sensitive. A tool that is not in the table has
/// no widget and falls back to plain-text rendering; that is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRegistry {
    mappings: IndexMap<String, WidgetKey>,
}

impl WidgetRegistry {
    /// Registry holding only the built-in mappings.
    pub fn with_defaults() -> Self {
        let mappings = DEFAULT_MAPPINGS
            .iter()
            .map(|(tool_name, widget)| ((*tool_name).to_string(), *widget))
            .collect();
        Self { mappings }
    }

    /// Registry with no mappings at all; every tool renders as text.
    pub fn empty() -> Self {
        Self {
            mappings: IndexMap::new(),
        }
    }

    /// Consume the registry and return one extended by `overrides`.
    ///
    /// Overrides add new tools or replace the widget of an existing one. This
    /// is the only way to change a registry, and it happens before the
    /// registry is handed to a presenter.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, WidgetKey)>,
        S: Into<String>,
    {
        for (tool_name, widget) in overrides {
            self.mappings.insert(tool_name.into(), widget);
        }
        self
    }

    /// Resolve the widget for a tool, if it has one.
    pub fn resolve(&self, tool_name: &str) -> Option<WidgetKey> {
        self.mappings.get(tool_name).copied()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
