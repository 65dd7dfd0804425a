//! Upload orchestrator
//!
//! Turns a user-selected file into a running job: register the dataset, then
//! start a job bound to it. No retries; the first failure ends the attempt.

use std::sync::Arc;
use tracing::{info, warn};
use udaq_core::domain::job::JobId;
use udaq_core::dto::dataset::UploadFile;

use crate::error::SubmissionError;
use crate::repository::JobRepository;

/// Drives the two-step submission workflow
#[derive(Clone)]
pub struct UploadOrchestrator {
    repository: Arc<dyn JobRepository>,
}

impl UploadOrchestrator {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    /// Submits a file for analysis
    ///
    /// Yields exactly one of a job id or a [`SubmissionError`]. When job creation
    /// fails the registered dataset is left orphaned on the service.
    pub async fn submit(&self, file: &UploadFile) -> Result<JobId, SubmissionError> {
        info!("Registering dataset {}", file.name);
        let dataset = self
            .repository
            .register_dataset(file)
            .await
            .map_err(|source| {
                warn!("Dataset registration failed for {}: {}", file.name, source);
                SubmissionError::RegisterDataset { source }
            })?;

        info!("Registered dataset {}; starting job", dataset.id);
        let job_id = self
            .repository
            .start_job(&dataset.id)
            .await
            .map_err(|source| {
                warn!("Job creation failed for dataset {}: {}", dataset.id, source);
                SubmissionError::StartJob {
                    dataset_id: dataset.id.clone(),
                    source,
                }
            })?;

        info!("Started job {} for dataset {}", job_id, dataset.id);
        Ok(job_id)
    }
}
