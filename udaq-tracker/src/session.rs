//! Dashboard session
//!
//! Owns at most one active poller. Tracking a new job always stops the
//! previous poller first, so two jobs' states can never mix.

use std::sync::Arc;
use tracing::info;
use udaq_core::domain::job::JobId;
use udaq_core::dto::dataset::UploadFile;

use crate::config::TrackerConfig;
use crate::error::{SessionError, SubmissionError};
use crate::repository::{HttpJobRepository, JobRepository};
use crate::scheduler::{JobPoller, PollerHandle, PollerState};
use crate::service::UploadOrchestrator;

pub struct Session {
    orchestrator: UploadOrchestrator,
    poller: JobPoller,
    active: Option<PollerHandle>,
}

impl Session {
    pub fn new(repository: Arc<dyn JobRepository>, config: &TrackerConfig) -> Self {
        Self {
            orchestrator: UploadOrchestrator::new(Arc::clone(&repository)),
            poller: JobPoller::new(repository, config),
            active: None,
        }
    }

    /// Session talking HTTP to the service at `config.base_url`
    pub fn connect(config: &TrackerConfig) -> Self {
        Self::new(Arc::new(HttpJobRepository::new(config.base_url.clone())), config)
    }

    pub fn current(&self) -> Option<&PollerHandle> {
        self.active.as_ref()
    }

    pub fn state(&self) -> PollerState {
        self.active
            .as_ref()
            .map(PollerHandle::state)
            .unwrap_or(PollerState::Idle)
    }

    /// Submits a file and, on success, starts tracking the new job
    ///
    /// A failed submission leaves the current job (if any) untouched.
    pub async fn submit(
        &mut self,
        file: &UploadFile,
    ) -> Result<&mut PollerHandle, SubmissionError> {
        let job_id = self.orchestrator.submit(file).await?;
        Ok(self.track(job_id))
    }

    /// Starts tracking `job_id`, stopping any previous poller first
    pub fn track(&mut self, job_id: JobId) -> &mut PollerHandle {
        if let Some(previous) = self.active.take() {
            info!(
                "Stopping poller for job {} before tracking job {}",
                previous.job_id(),
                job_id
            );
            previous.stop();
        }
        self.active.insert(self.poller.start(job_id))
    }

    /// Discards the current job so a fresh submission can start
    ///
    /// Only allowed once the job is terminal (or its poller was stopped).
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let Some(handle) = &self.active {
            let state = handle.state();
            if state == PollerState::Polling {
                return Err(SessionError::NotTerminal {
                    job_id: handle.job_id().clone(),
                    state,
                });
            }
        }
        self.active = None;
        Ok(())
    }
}
