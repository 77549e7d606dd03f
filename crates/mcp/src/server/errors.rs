//! Structured tool error helpers.

use chrono::Utc;
use relo_api::ApiError;
use rmcp::model::ErrorData;
use serde_json::Value;

fn build_error_data(error_code: &str, category: &str, message: &str, context: Value, retryable: bool, suggested_action: &str) -> Value {
    serde_json::json!({
        "error_code": error_code,
        "category": category,
        "message": message,
        "context": context,
        "retryable": retryable,
        "suggested_action": suggested_action,
        "correlation_id": format!("relo-{}", Utc::now().timestamp_millis()),
    })
}

pub fn invalid_params_error(error_code: &str, message: impl Into<String>, context: Value, suggested_action: &str) -> ErrorData {
    let message = message.into();
    ErrorData::invalid_params(
        message.clone(),
        Some(build_error_data(error_code, "validation", &message, context, false, suggested_action)),
    )
}

pub fn execution_error(error_code: &str, message: impl Into<String>, context: Value, retryable: bool, suggested_action: &str) -> ErrorData {
    let message = message.into();
    ErrorData::internal_error(
        message.clone(),
        Some(build_error_data(error_code, "execution", &message, context, retryable, suggested_action)),
    )
}

/// Map a failed API call onto a tool error, keeping the API's own message.
pub fn api_error(tool_name: &str, procedure: &str, error: &ApiError) -> ErrorData {
    let context = serde_json::json!({ "tool": tool_name, "procedure": procedure });
    let suggested_action = if error.is_retryable() {
        "Retry the tool call; the relocation API may be temporarily unavailable."
    } else {
        "Check the tool arguments and that the referenced records exist."
    };
    execution_error(error.error_code(), error.to_string(), context, error.is_retryable(), suggested_action)
}
