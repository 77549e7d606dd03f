//! Error type for relocation API calls.

use thiserror::Error;

/// Failures raised while building the client or invoking a procedure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing API credentials: set {env_var} or apiKey in the configuration file")]
    MissingCredentials { env_var: &'static str },

    #[error("API credentials contain characters that cannot be sent in a header")]
    InvalidCredentials,

    #[error("invalid API base URL '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode input for {procedure}: {reason}")]
    Encode { procedure: String, reason: String },

    #[error("{procedure} returned HTTP {status}: {message}")]
    Status { procedure: String, status: u16, message: String },

    #[error("{procedure} failed{}: {message}", code_suffix(.code))]
    Procedure {
        procedure: String,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected response from {procedure}: {reason}")]
    Decode { procedure: String, reason: String },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|code| format!(" ({code})")).unwrap_or_default()
}

impl ApiError {
    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(error) => error.is_timeout() || error.is_connect(),
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Procedure { code, .. } => matches!(code.as_deref(), Some("TIMEOUT" | "TOO_MANY_REQUESTS")),
            ApiError::MissingCredentials { .. }
            | ApiError::InvalidCredentials
            | ApiError::InvalidBaseUrl { .. }
            | ApiError::Encode { .. }
            | ApiError::Decode { .. } => false,
        }
    }

    /// Stable machine-readable code for structured error payloads.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials { .. } => "API_MISSING_CREDENTIALS",
            ApiError::InvalidCredentials => "API_INVALID_CREDENTIALS",
            ApiError::InvalidBaseUrl { .. } => "API_INVALID_BASE_URL",
            ApiError::Transport(_) => "API_TRANSPORT_FAILED",
            ApiError::Encode { .. } => "API_ENCODE_FAILED",
            ApiError::Status { .. } => "API_HTTP_STATUS",
            ApiError::Procedure { .. } => "API_PROCEDURE_FAILED",
            ApiError::Decode { .. } => "API_DECODE_FAILED",
        }
    }
}
