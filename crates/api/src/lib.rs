//! Relocation API client.
//!
//! This crate provides a lightweight client for the relocation platform's
//! tRPC API layer. It focuses on:
//!
//! - Constructing an HTTP client with bearer auth and sensible defaults
//! - Validating the configured base URL for safety
//! - Mapping procedures onto tRPC's HTTP conventions (queries as `GET` with
//!   an `input` query parameter, mutations as `POST` with a JSON body)
//! - Unwrapping the `{"result":{"data":...}}` envelope, including the
//!   superjson `{"json":...}` wrapper, and mapping error envelopes
//!
//! Business semantics live behind the API; this client only moves JSON.
//!
//! # Example
//!
//! ```ignore
//! use relo_api::{ClientSettings, Procedure, RelocationBackend, RelocationClient};
//!
//! async fn list_moves() -> Result<serde_json::Value, relo_api::ApiError> {
//!     let settings = ClientSettings {
//!         api_key: Some("token".into()),
//!         ..ClientSettings::default()
//!     };
//!     let client = RelocationClient::new(settings)?;
//!     client.invoke(Procedure::query("move.list"), serde_json::Value::Null).await
//! }
//! ```

mod backend;
mod error;

use std::env;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, header};
use serde_json::Value;
use tracing::debug;
use url::Url;

pub use backend::{Procedure, ProcedureKind, RelocationBackend};
pub use error::ApiError;

/// Environment variable holding the API base URL.
pub const API_BASE_ENV: &str = "RELO_API_BASE";
/// Environment variable holding the API token.
pub const API_KEY_ENV: &str = "RELO_API_KEY";
/// Base URL used when nothing is configured: the dashboard's local dev server.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api/trpc";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostnames allowed to use plain HTTP.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];
/// Longest slice of a non-JSON error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Inputs needed to build a [`RelocationClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Thin wrapper around a configured `reqwest::Client` for the relocation API.
#[derive(Debug, Clone)]
pub struct RelocationClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl RelocationClient {
    /// Build a client from settings.
    ///
    /// Fails when no API token is available or the base URL is unsafe; both
    /// are startup configuration errors for the tool servers.
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ApiError::MissingCredentials { env_var: API_KEY_ENV })?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        let authorization = header::HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| ApiError::InvalidCredentials)?;
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("relo-mcp/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request for a procedure without sending it.
    pub fn request(&self, procedure: Procedure, input: &Value) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}/{}", self.base_url, procedure.path);
        debug!(%url, kind = ?procedure.kind, "building request");

        let builder = match procedure.kind {
            ProcedureKind::Query if input.is_null() => self.http.get(url),
            ProcedureKind::Query => {
                let encoded = serde_json::to_string(input).map_err(|error| ApiError::Encode {
                    procedure: procedure.path.to_string(),
                    reason: error.to_string(),
                })?;
                self.http.get(url).query(&[("input", encoded)])
            }
            ProcedureKind::Mutation => self.http.post(url).json(input),
        };
        Ok(builder.header(header::USER_AGENT, &self.user_agent))
    }
}

#[async_trait::async_trait]
impl RelocationBackend for RelocationClient {
    async fn invoke(&self, procedure: Procedure, input: Value) -> Result<Value, ApiError> {
        let response = self.request(procedure, &input)?.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(procedure = procedure.path, status, bytes = body.len(), "procedure responded");
        decode_response(procedure.path, status, &body)
    }
}

/// Turn a raw tRPC HTTP response into the procedure's result data.
pub fn decode_response(procedure: &str, status: u16, body: &str) -> Result<Value, ApiError> {
    let success = (200..300).contains(&status);
    let envelope: Value = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(error) if success => {
            return Err(ApiError::Decode {
                procedure: procedure.to_string(),
                reason: format!("body is not JSON: {error}"),
            });
        }
        Err(_) => {
            return Err(ApiError::Status {
                procedure: procedure.to_string(),
                status,
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
    };

    if let Some(error) = envelope.get("error") {
        return Err(procedure_error(procedure, error));
    }
    if !success {
        return Err(ApiError::Status {
            procedure: procedure.to_string(),
            status,
            message: envelope.to_string().chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let result = envelope.get("result").ok_or_else(|| ApiError::Decode {
        procedure: procedure.to_string(),
        reason: "missing 'result' in response envelope".to_string(),
    })?;
    Ok(result.get("data").cloned().map(unwrap_superjson).unwrap_or(Value::Null))
}

/// Strip a superjson `{"json": ..., "meta": ...}` wrapper when present.
fn unwrap_superjson(data: Value) -> Value {
    match data {
        Value::Object(mut fields) if fields.contains_key("json") && fields.keys().all(|key| key == "json" || key == "meta") => {
            fields.remove("json").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn procedure_error(procedure: &str, error: &Value) -> ApiError {
    let error = error.get("json").unwrap_or(error);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("procedure failed without a message")
        .to_string();
    let code = error
        .get("data")
        .and_then(|data| data.get("code"))
        .and_then(Value::as_str)
        .map(str::to_string);
    ApiError::Procedure {
        procedure: procedure.to_string(),
        code,
        message,
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - scheme must be `http` or `https` and a host must be present
/// - plain `http` is only accepted for localhost addresses
pub fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        base: base.to_string(),
        reason,
    };
    let parsed = Url::parse(base).map_err(|error| invalid(error.to_string()))?;
    let host_name = parsed.host_str().ok_or_else(|| invalid("must include a host".into()))?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if LOCALHOST_DOMAINS.iter().any(|&allowed| host_name.eq_ignore_ascii_case(allowed)) => Ok(()),
        "http" => Err(invalid(format!("plain http is only allowed for localhost; got host '{host_name}'"))),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}://'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings_with_key() -> ClientSettings {
        ClientSettings {
            api_key: Some("test-token".into()),
            ..ClientSettings::default()
        }
    }

    #[test]
    fn unwraps_result_data() {
        let body = r#"{"result":{"data":[{"id":"m1"}]}}"#;
        assert_eq!(decode_response("move.list", 200, body).expect("decoded"), json!([{"id": "m1"}]));
    }

    #[test]
    fn unwraps_superjson_envelope() {
        let body = r#"{"result":{"data":{"json":{"id":"m1"},"meta":{"values":{"createdAt":["Date"]}}}}}"#;
        assert_eq!(decode_response("move.getById", 200, body).expect("decoded"), json!({"id": "m1"}));
    }

    #[test]
    fn keeps_objects_that_merely_contain_a_json_field() {
        let body = r#"{"result":{"data":{"json":"raw","id":"doc-1"}}}"#;
        assert_eq!(
            decode_response("document.get", 200, body).expect("decoded"),
            json!({"json": "raw", "id": "doc-1"})
        );
    }

    #[test]
    fn missing_data_is_null() {
        assert_eq!(decode_response("move.update", 200, r#"{"result":{}}"#).expect("decoded"), Value::Null);
    }

    #[test]
    fn maps_trpc_error_envelope() {
        let body = r#"{"error":{"json":{"message":"Move not found","code":-32004,"data":{"code":"NOT_FOUND","httpStatus":404}}}}"#;
        let error = decode_response("move.getById", 404, body).expect_err("error envelope");
        match error {
            ApiError::Procedure { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("NOT_FOUND"));
                assert_eq!(message, "Move not found");
            }
            other => panic!("expected procedure error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_failure_maps_to_status() {
        let error = decode_response("invoice.list", 502, "<html>Bad gateway</html>").expect_err("status error");
        assert!(matches!(error, ApiError::Status { status: 502, .. }));
        assert!(error.is_retryable());
    }

    #[test]
    fn non_json_success_is_a_decode_error() {
        let error = decode_response("invoice.list", 200, "ok").expect_err("decode error");
        assert!(matches!(error, ApiError::Decode { .. }));
    }

    #[test]
    fn missing_result_is_a_decode_error() {
        let error = decode_response("invoice.list", 200, r#"{"data":[]}"#).expect_err("decode error");
        assert!(matches!(error, ApiError::Decode { .. }));
    }

    #[test]
    fn validates_base_urls() {
        assert!(validate_base_url("http://localhost:3000/api/trpc").is_ok());
        assert!(validate_base_url("http://127.0.0.1:3000/api/trpc").is_ok());
        assert!(validate_base_url("https://relo.example.com/api/trpc").is_ok());
        assert!(validate_base_url("http://relo.example.com/api/trpc").is_err());
        assert!(validate_base_url("ftp://localhost/api").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn client_requires_credentials() {
        let error = RelocationClient::new(ClientSettings::default()).expect_err("missing key");
        assert!(matches!(error, ApiError::MissingCredentials { .. }));

        let blank = ClientSettings {
            api_key: Some("   ".into()),
            ..ClientSettings::default()
        };
        assert!(matches!(RelocationClient::new(blank), Err(ApiError::MissingCredentials { .. })));
    }

    #[test]
    fn client_trims_trailing_slash() {
        let settings = ClientSettings {
            base_url: "http://localhost:3000/api/trpc/".into(),
            ..settings_with_key()
        };
        let client = RelocationClient::new(settings).expect("client");
        assert_eq!(client.base_url(), "http://localhost:3000/api/trpc");
    }

    #[test]
    fn queries_encode_input_as_query_parameter() {
        let client = RelocationClient::new(settings_with_key()).expect("client");
        let request = client
            .request(Procedure::query("move.getById"), &json!({"id": "m1"}))
            .expect("builder")
            .build()
            .expect("request");
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/api/trpc/move.getById");
        let input = request
            .url()
            .query_pairs()
            .find(|(key, _)| key == "input")
            .map(|(_, value)| value.into_owned());
        assert_eq!(input.as_deref(), Some(r#"{"id":"m1"}"#));
        assert!(request.headers().contains_key(header::USER_AGENT));
    }

    #[test]
    fn mutations_post_a_json_body() {
        let client = RelocationClient::new(settings_with_key()).expect("client");
        let request = client
            .request(Procedure::mutation("move.create"), &json!({"employeeId": "e1"}))
            .expect("builder")
            .build()
            .expect("request");
        assert_eq!(request.method(), reqwest::Method::POST);
        assert!(request.url().query().is_none());
        let body = request.body().and_then(|body| body.as_bytes()).expect("buffered body");
        assert_eq!(serde_json::from_slice::<Value>(body).expect("json body"), json!({"employeeId": "e1"}));
    }
}
