//! Cleaned artifact retrieval
//!
//! Artifacts live outside the API, under `/media/cleaned/` on the same origin.

use tracing::debug;

use crate::ServiceClient;
use crate::error::{ClientError, Result};

impl ServiceClient {
    /// Fetchable location of a cleaned artifact
    ///
    /// # Arguments
    /// * `filename` - Trailing filename component of the report's cleaned path
    pub fn artifact_url(&self, filename: &str) -> Result<String> {
        self.segment_url(["media", "cleaned", filename])
    }

    /// Download a cleaned artifact
    ///
    /// # Returns
    /// The raw artifact bytes
    pub async fn download_artifact(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self.artifact_url(filename)?;
        debug!("Downloading artifact from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(
                status.as_u16(),
                crate::error_message(&body),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_artifact_url() {
        let client = ServiceClient::new("http://localhost:8000/");
        assert_eq!(
            client.artifact_url("cleaned_123.csv").unwrap(),
            "http://localhost:8000/media/cleaned/cleaned_123.csv"
        );
    }

    #[test]
    fn test_artifact_url_encodes_filename() {
        let client = ServiceClient::new("http://localhost:8000");
        assert_eq!(
            client.artifact_url("cleaned my data.csv").unwrap(),
            "http://localhost:8000/media/cleaned/cleaned%20my%20data.csv"
        );
    }

    #[test]
    fn test_artifact_url_invalid_base() {
        let client = ServiceClient::new("not a url");
        assert!(matches!(
            client.artifact_url("a.csv"),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_download_artifact() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/media/cleaned/cleaned_123.csv");
                then.status(200).body("a,b\n1,2\n");
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let bytes = client.download_artifact("cleaned_123.csv").await.unwrap();

        assert_eq!(bytes, b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn test_download_missing_artifact() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/media/cleaned/gone.csv");
                then.status(404).body("Not Found");
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let err = client.download_artifact("gone.csv").await.unwrap_err();

        assert!(err.is_not_found());
    }
}
