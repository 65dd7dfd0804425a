//! Jobs repository
//!
//! Handles communication with the analysis service for:
//! - Registering datasets
//! - Starting jobs
//! - Fetching job state

use async_trait::async_trait;
use udaq_client::{Result, ServiceClient};
use udaq_core::domain::dataset::{Dataset, DatasetId};
use udaq_core::domain::job::JobId;
use udaq_core::dto::dataset::UploadFile;
use udaq_core::dto::job::JobPayload;

/// Repository trait for the analysis service's job workflow
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Registers a file as a dataset
    ///
    /// # Arguments
    /// * `file` - The user-selected file, forwarded untouched
    async fn register_dataset(&self, file: &UploadFile) -> Result<Dataset>;

    /// Starts a job bound to a registered dataset
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset returned by [`JobRepository::register_dataset`]
    async fn start_job(&self, dataset_id: &DatasetId) -> Result<JobId>;

    /// Fetches the raw current state of a job
    ///
    /// # Arguments
    /// * `job_id` - The job to fetch
    async fn fetch_job(&self, job_id: &JobId) -> Result<JobPayload>;
}

/// HTTP implementation of JobRepository
#[derive(Debug, Clone)]
pub struct HttpJobRepository {
    client: ServiceClient,
}

impl HttpJobRepository {
    /// Creates a new HTTP job repository
    ///
    /// # Arguments
    /// * `base_url` - Origin of the analysis service (e.g., "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_client(ServiceClient::new(base_url))
    }

    pub fn from_client(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }
}

#[async_trait]
impl JobRepository for HttpJobRepository {
    async fn register_dataset(&self, file: &UploadFile) -> Result<Dataset> {
        self.client.register_dataset(file).await
    }

    async fn start_job(&self, dataset_id: &DatasetId) -> Result<JobId> {
        self.client.start_job(dataset_id).await
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<JobPayload> {
        self.client.get_job(job_id).await
    }
}
