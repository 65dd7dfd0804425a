//! Error types for submission and tracking

use thiserror::Error;
use udaq_client::ClientError;
use udaq_core::domain::dataset::DatasetId;
use udaq_core::domain::job::JobId;
use udaq_core::normalize::NormalizeError;

use crate::scheduler::PollerState;

/// Step of the two-step submission that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    RegisterDataset,
    StartJob,
}

impl std::fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStage::RegisterDataset => write!(f, "dataset registration"),
            SubmissionStage::StartJob => write!(f, "job creation"),
        }
    }
}

/// A submission attempt failed; no job id was produced
///
/// Fatal to the attempt only. Retrying means submitting again from scratch.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("dataset registration failed: {}", .source.server_message())]
    RegisterDataset { source: ClientError },

    /// The dataset stays registered server-side; it is not rolled back.
    #[error("job creation failed: {}", .source.server_message())]
    StartJob {
        dataset_id: DatasetId,
        source: ClientError,
    },
}

impl SubmissionError {
    pub fn stage(&self) -> SubmissionStage {
        match self {
            SubmissionError::RegisterDataset { .. } => SubmissionStage::RegisterDataset,
            SubmissionError::StartJob { .. } => SubmissionStage::StartJob,
        }
    }

    /// Dataset left behind when job creation failed
    pub fn dataset_id(&self) -> Option<&DatasetId> {
        match self {
            SubmissionError::RegisterDataset { .. } => None,
            SubmissionError::StartJob { dataset_id, .. } => Some(dataset_id),
        }
    }

    pub fn client_error(&self) -> &ClientError {
        match self {
            SubmissionError::RegisterDataset { source } => source,
            SubmissionError::StartJob { source, .. } => source,
        }
    }

    /// The underlying failure message, verbatim from the server when it sent one
    pub fn server_message(&self) -> String {
        self.client_error().server_message()
    }
}

/// A single poll that produced no usable snapshot
///
/// Never fatal: the poller records it and retries on the next tick.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to fetch job: {0}")]
    Fetch(#[from] ClientError),

    #[error("malformed job payload: {0}")]
    Malformed(#[from] NormalizeError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("job {job_id} is still being tracked ({state:?}); wait for a terminal status")]
    NotTerminal { job_id: JobId, state: PollerState },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_messages() {
        let err = SubmissionError::StartJob {
            dataset_id: DatasetId::new("3"),
            source: ClientError::api_error(404, "Dataset not found"),
        };
        assert_eq!(err.stage(), SubmissionStage::StartJob);
        assert_eq!(err.dataset_id(), Some(&DatasetId::new("3")));
        assert_eq!(err.server_message(), "Dataset not found");
        assert_eq!(err.to_string(), "job creation failed: Dataset not found");

        let err = SubmissionError::RegisterDataset {
            source: ClientError::ParseError("missing field `id`".to_string()),
        };
        assert_eq!(err.stage(), SubmissionStage::RegisterDataset);
        assert!(err.dataset_id().is_none());
    }
}
