//! Helpers for building per-call presentation log payloads.
//!
//! After a tool returns, the server runs the same classification the chat UI
//! will run and logs what it found. These helpers keep the payload shape and
//! the size guardrail in one place so every domain server logs the same way.

use relo_widgets::{Presentation, Presenter};
use serde_json::{Map, Value};

const MAX_RESPONSE_TEXT_CLASSIFY_BYTES: usize = 256 * 1024;

/// Builds the presentation payload for a tool's response text.
///
/// Returns `None` when the text is too large to classify cheaply; the tool
/// response itself is unaffected either way.
pub(crate) fn build_presentation_payload(presenter: &Presenter, tool_name: &str, response_text: &str) -> Option<Value> {
    if response_text.len() > MAX_RESPONSE_TEXT_CLASSIFY_BYTES {
        return None;
    }
    let presentation = presenter.present(tool_name, Some(response_text));
    Some(presentation_payload(tool_name, &presentation))
}

fn presentation_payload(tool_name: &str, presentation: &Presentation) -> Value {
    let mut payload = Map::new();
    payload.insert("tool".to_string(), Value::String(tool_name.to_string()));
    payload.insert(
        "widget".to_string(),
        presentation
            .widget
            .map(|widget| Value::String(widget.to_string()))
            .unwrap_or(Value::Null),
    );
    if let Some(result) = &presentation.result {
        payload.insert("kind".to_string(), Value::String(result.kind().to_string()));
        if let Some(items) = result.items() {
            payload.insert("item_count".to_string(), Value::from(items.len()));
        }
    }
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_widget_and_kind() {
        let presenter = Presenter::default();
        let payload = build_presentation_payload(&presenter, "list_invoices", r#"[{"invoiceNumber":"INV-1"},{"invoiceNumber":"INV-2"}]"#)
            .expect("payload");
        assert_eq!(
            payload,
            serde_json::json!({"tool": "list_invoices", "widget": "invoice-list", "kind": "list-of-invoices", "item_count": 2})
        );
    }

    #[test]
    fn unclassifiable_text_has_no_kind() {
        let presenter = Presenter::default();
        let payload = build_presentation_payload(&presenter, "update_move", "not json").expect("payload");
        assert_eq!(payload, serde_json::json!({"tool": "update_move", "widget": null}));
    }

    #[test]
    fn oversized_text_is_skipped() {
        let presenter = Presenter::default();
        let text = format!("[{}]", "1,".repeat(MAX_RESPONSE_TEXT_CLASSIFY_BYTES) + "1");
        assert!(build_presentation_payload(&presenter, "list_moves", &text).is_none());
    }
}
