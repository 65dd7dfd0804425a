//! UDA-Q HTTP Client
//!
//! A small, type-safe HTTP client for the data-quality analysis service.
//!
//! The service exposes its JSON API under `/api` and serves cleaned artifacts
//! from `/media/cleaned` on the same origin. This client knows both and is
//! configured with the origin only.
//!
//! # Example
//!
//! ```no_run
//! use udaq_client::ServiceClient;
//! use udaq_core::dto::dataset::UploadFile;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceClient::new("http://localhost:8000");
//!
//!     let file = UploadFile::new("sales.csv", std::fs::read("sales.csv")?);
//!     let dataset = client.register_dataset(&file).await?;
//!     let job_id = client.start_job(&dataset.id).await?;
//!
//!     println!("Started job {}", job_id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod datasets;
mod jobs;
mod media;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use udaq_core::dto::job::JobPayload;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Path prefix of the JSON API
const API_PREFIX: &str = "api";

/// HTTP client for the analysis service API
///
/// Endpoints are grouped by resource:
/// - Dataset registration (multipart upload)
/// - Job creation and status
/// - Cleaned artifact retrieval
#[derive(Debug, Clone)]
pub struct ServiceClient {
    /// Origin of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ServiceClient {
    /// Create a new service client
    ///
    /// # Arguments
    /// * `base_url` - Origin of the service, without the `/api` suffix
    ///
    /// # Example
    /// ```
    /// use udaq_client::ServiceClient;
    ///
    /// let client = ServiceClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new service client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    /// No per-request timeout is applied otherwise.
    ///
    /// # Example
    /// ```
    /// use udaq_client::ServiceClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ServiceClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API endpoint, e.g. `api_url("jobs/3/")`
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }

    /// Absolute URL made of percent-encoded path segments under the origin
    ///
    /// A segment can never introduce a `/`, `?` or `#` of its own.
    fn segment_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("Base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url.to_string())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] carrying the server's
    /// message; bodies that do not match `T` become [`ClientError::ParseError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_message(&body)));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

/// Extracts the user-facing message from an error body
///
/// The service reports failures as `{"error": "..."}`; anything else (validation
/// maps, HTML error pages) is passed through as text.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = fields.get("error") {
            return message.clone();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
