//! Shared services for domain tool handlers.

use std::sync::Arc;

use relo_api::{Procedure, RelocationBackend};
use relo_widgets::Presenter;
use rmcp::model::{CallToolResult, Content, ErrorData};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::server::errors::{api_error, execution_error, invalid_params_error};
use crate::server::log_payload::build_presentation_payload;

/// Everything a tool handler needs: the API backend and the presenter used
/// for per-call presentation logging.
///
/// Cloned into each domain server; both members are immutable after startup.
#[derive(Debug, Clone)]
pub struct ToolContext {
    backend: Arc<dyn RelocationBackend>,
    presenter: Arc<Presenter>,
}

impl ToolContext {
    pub fn new(backend: Arc<dyn RelocationBackend>, presenter: Arc<Presenter>) -> Self {
        Self { backend, presenter }
    }

    /// Forward a tool call to `procedure` and wrap the JSON result as text.
    ///
    /// Absent optional fields are removed from `params` before forwarding. An
    /// empty argument object is sent as "no input".
    pub async fn invoke<P: Serialize>(&self, tool_name: &str, procedure: Procedure, params: &P) -> Result<CallToolResult, ErrorData> {
        let input = serde_json::to_value(params).map(compact_input).map_err(|error| {
            invalid_params_error(
                "TOOL_ARGUMENTS_UNENCODABLE",
                format!("failed to encode arguments: {error}"),
                serde_json::json!({ "tool": tool_name }),
                "Check the tool arguments against the input schema.",
            )
        })?;
        self.invoke_value(tool_name, procedure, input).await
    }

    /// Forward a tool call that takes no arguments.
    pub async fn invoke_without_input(&self, tool_name: &str, procedure: Procedure) -> Result<CallToolResult, ErrorData> {
        self.invoke_value(tool_name, procedure, Value::Null).await
    }

    async fn invoke_value(&self, tool_name: &str, procedure: Procedure, input: Value) -> Result<CallToolResult, ErrorData> {
        debug!(tool = tool_name, procedure = %procedure, "tool invoked");
        let data = self.backend.invoke(procedure, input).await.map_err(|error| {
            warn!(tool = tool_name, procedure = %procedure, error = %error, "tool call failed");
            api_error(tool_name, procedure.path, &error)
        })?;

        let text = serde_json::to_string(&data).map_err(|error| {
            execution_error(
                "TOOL_RESULT_UNENCODABLE",
                format!("failed to encode result: {error}"),
                serde_json::json!({ "tool": tool_name, "procedure": procedure.path }),
                false,
                "Report this result shape to the API maintainers.",
            )
        })?;

        match build_presentation_payload(&self.presenter, tool_name, &text) {
            Some(payload) => debug!(%payload, "tool result presentation"),
            None => debug!(tool = tool_name, bytes = text.len(), "tool result too large to classify"),
        }
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Reject blank identifiers before they reach the API.
    pub fn require_non_empty(tool_name: &str, field: &str, value: &str) -> Result<(), ErrorData> {
        if value.trim().is_empty() {
            return Err(invalid_params_error(
                "TOOL_ARGUMENT_EMPTY",
                format!("'{field}' must not be empty"),
                serde_json::json!({ "tool": tool_name, "field": field }),
                "Pass a non-empty value; list tools return valid identifiers.",
            ));
        }
        Ok(())
    }
}

/// Drop top-level `null` fields; an object left empty becomes `Value::Null`.
fn compact_input(input: Value) -> Value {
    match input {
        Value::Object(mut fields) => {
            fields.retain(|_, value| !value.is_null());
            if fields.is_empty() { Value::Null } else { Value::Object(fields) }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::{RecordingBackend, response_text};
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        move_id: Option<String>,
        status: Option<String>,
    }

    #[test]
    fn compact_input_drops_nulls() {
        assert_eq!(compact_input(json!({"a": null, "b": 1})), json!({"b": 1}));
        assert_eq!(compact_input(json!({"a": null})), Value::Null);
        assert_eq!(compact_input(json!([null])), json!([null]));
    }

    #[tokio::test]
    async fn forwards_compacted_input_and_returns_json_text() {
        let backend = RecordingBackend::returning(json!([{"invoiceNumber": "INV-1"}]));
        let context = ToolContext::new(backend.clone(), Arc::new(Presenter::default()));

        let params = Filter {
            move_id: Some("m1".into()),
            status: None,
        };
        let result = context
            .invoke("list_invoices", Procedure::query("invoice.list"), &params)
            .await
            .expect("tool result");

        assert_eq!(response_text(&result).as_deref(), Some(r#"[{"invoiceNumber":"INV-1"}]"#));
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "invoice.list");
        assert_eq!(calls[0].1, json!({"moveId": "m1"}));
    }

    #[tokio::test]
    async fn result_text_keeps_the_api_field_order() {
        let backend = RecordingBackend::returning(json!({"status": "planning", "id": "m1", "employee": {"name": "Jo", "id": "e1"}}));
        let context = ToolContext::new(backend, Arc::new(Presenter::default()));
        let result = context
            .invoke_without_input("get_move", Procedure::query("move.getById"))
            .await
            .expect("tool result");
        assert_eq!(
            response_text(&result).as_deref(),
            Some(r#"{"status":"planning","id":"m1","employee":{"name":"Jo","id":"e1"}}"#)
        );
    }

    #[tokio::test]
    async fn api_failures_become_tool_errors() {
        let backend = RecordingBackend::failing();
        let context = ToolContext::new(backend, Arc::new(Presenter::default()));
        let error = context
            .invoke_without_input("get_dashboard_summary", Procedure::query("dashboard.summary"))
            .await
            .expect_err("backend failure");
        let payload = error.data.expect("structured payload");
        assert_eq!(payload["error_code"], "API_PROCEDURE_FAILED");
        assert_eq!(payload["context"]["procedure"], "dashboard.summary");
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(ToolContext::require_non_empty("get_move", "id", "  ").is_err());
        assert!(ToolContext::require_non_empty("get_move", "id", "m1").is_ok());
    }
}
