use relo_types::WidgetKey;
use serde::Serialize;

use crate::classify::{ClassifiedResult, classify};
use crate::registry::WidgetRegistry;

/// What the chat UI needs to render one tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    /// Widget to render with; `None` means plain text.
    pub widget: Option<WidgetKey>,
    /// Normalized payload; `None` when the result could not be classified.
    pub result: Option<ClassifiedResult>,
}

impl Presentation {
    /// True when neither a widget nor a classified payload is available.
    pub fn is_plain_text(&self) -> bool {
        self.widget.is_none() && self.result.is_none()
    }
}

/// Pairs a tool's widget with its classified payload.
///
/// Widget resolution and classification are independent: an unmapped tool
/// still has its payload classified, and a mapped tool with a broken payload
/// keeps its widget.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    registry: WidgetRegistry,
}

impl Presenter {
    pub fn new(registry: WidgetRegistry) -> Self {
        Self { registry }
    }

    pub fn resolve_widget(&self, tool_name: &str) -> Option<WidgetKey> {
        self.registry.resolve(tool_name)
    }

    pub fn present(&self, tool_name: &str, raw: Option<&str>) -> Presentation {
        Presentation {
            widget: self.registry.resolve(tool_name),
            result: classify(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_tool_with_malformed_payload_keeps_widget() {
        let presenter = Presenter::default();
        let presentation = presenter.present("list_invoices", Some("<html>"));
        assert_eq!(presentation.widget, Some(WidgetKey::InvoiceList));
        assert_eq!(presentation.result, None);
    }

    #[test]
    fn unmapped_tool_is_still_classified() {
        let presenter = Presenter::default();
        let presentation = presenter.present("list_employers", Some(r#"[{"name":"Acme"}]"#));
        assert_eq!(presentation.widget, None);
        assert_eq!(presentation.result.as_ref().map(ClassifiedResult::kind), Some("generic-list"));
    }

    #[test]
    fn unmapped_tool_without_payload_is_plain_text() {
        let presenter = Presenter::default();
        assert!(presenter.present("update_move_status", None).is_plain_text());
    }
}
