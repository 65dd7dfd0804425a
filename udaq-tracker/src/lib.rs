//! UDA-Q Tracker
//!
//! Client-side job lifecycle tracking for the data-quality analysis service.
//!
//! Architecture:
//! - Configuration: service origin and poll interval, passed in explicitly
//! - Repository: trait seam over the HTTP client
//! - Service: the upload orchestrator (register dataset, then start job)
//! - Scheduler: the job poller and its cancellable handle
//! - Session: at most one active poller per dashboard
//!
//! Data flows one way: orchestrator -> job id -> poller -> job view -> presentation.

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use config::TrackerConfig;
pub use error::{PollError, SessionError, SubmissionError, SubmissionStage};
pub use repository::{HttpJobRepository, JobRepository};
pub use scheduler::{JobPoller, PollerHandle, PollerState};
pub use service::UploadOrchestrator;
pub use session::Session;
