//! Job-related API endpoints

use udaq_core::domain::dataset::DatasetId;
use udaq_core::domain::job::JobId;
use udaq_core::dto::job::{JobCreated, JobPayload, StartJobRequest};

use crate::{API_PREFIX, ServiceClient};
use crate::error::Result;

impl ServiceClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Start an analysis job for a registered dataset
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset to analyse
    ///
    /// # Returns
    /// The identifier of the created job
    pub async fn start_job(&self, dataset_id: &DatasetId) -> Result<JobId> {
        let url = self.api_url("jobs/start_job/");
        let response = self
            .client
            .post(&url)
            .json(&StartJobRequest {
                dataset_id: dataset_id.clone(),
            })
            .send()
            .await?;

        let created: JobCreated = self.handle_response(response).await?;
        Ok(created.id)
    }

    /// Get the current state of a job
    ///
    /// The payload is returned raw; callers normalize it with
    /// [`udaq_core::normalize::normalize_job`].
    pub async fn get_job(&self, job_id: &JobId) -> Result<JobPayload> {
        let url = self.segment_url([API_PREFIX, "jobs", job_id.as_str(), ""])?;
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_start_job() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/jobs/start_job/")
                    .json_body(json!({"dataset_id": "11"}));
                then.status(201)
                    .header("content-type", "application/json")
                    .json_body(json!({"id": 4, "status": "PENDING", "logs": "[]"}));
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let job_id = client.start_job(&DatasetId::new("11")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(job_id, JobId::new("4"));
    }

    #[tokio::test]
    async fn test_start_job_surfaces_server_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/jobs/start_job/");
                then.status(404)
                    .header("content-type", "application/json")
                    .json_body(json!({"error": "Dataset not found"}));
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let err = client.start_job(&DatasetId::new("99")).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.server_message(), "Dataset not found");
    }

    #[tokio::test]
    async fn test_get_job() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/jobs/4/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "id": 4,
                        "dataset": 11,
                        "status": "RUNNING",
                        "logs": "[\"parsing file\"]",
                        "report": null
                    }));
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let payload = client.get_job(&JobId::new("4")).await.unwrap();

        assert_eq!(payload.status.as_deref(), Some("RUNNING"));
        assert_eq!(payload.logs, Some(json!("[\"parsing file\"]")));
    }

    #[tokio::test]
    async fn test_get_job_invalid_json() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/jobs/4/");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("not valid json");
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let result = client.get_job(&JobId::new("4")).await;

        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse response: "));
        assert_eq!(message.matches("Failed to parse").count(), 1);
    }

    #[tokio::test]
    async fn test_get_job_with_unexpected_metadata_types() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/jobs/4/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "id": 4,
                        "dataset": {"id": 11},
                        "status": "COMPLETED",
                        "logs": "[]",
                        "updated_at": 1767607200,
                        "report": {"initial_quality_score": 62.5, "final_quality_score": 91.0}
                    }));
            })
            .await;

        let client = ServiceClient::new(server.base_url());
        let payload = client.get_job(&JobId::new("4")).await.unwrap();
        let job = udaq_core::normalize::normalize_job(&JobId::new("4"), payload).unwrap();

        assert!(job.is_terminal());
        assert_eq!(job.report.unwrap().final_quality_score, 91.0);
    }
}
