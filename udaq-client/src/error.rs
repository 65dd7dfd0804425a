//! Error types for the UDA-Q client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the analysis service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, reset, TLS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Server-supplied `error` field, or the raw response body
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Message suitable for showing to a user verbatim
    ///
    /// For API errors this is the server's own message; otherwise the error's
    /// display form.
    pub fn server_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
