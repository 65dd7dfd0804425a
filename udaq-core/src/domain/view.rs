//! Client-side job view
//!
//! The only state the presentation layer reads. A poller owns its view
//! exclusively; readers get clones or a watch receiver.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::job::{Job, JobStatus};
use super::report::Report;

/// Diagnostic record of the most recent failed poll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollFailure {
    pub message: String,
    /// Failures since the last successful poll, including this one
    pub consecutive: u32,
    pub at: DateTime<Utc>,
}

/// Externally observable state of one job poller
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobView {
    /// Last successfully normalized snapshot, if any
    pub job: Option<Job>,
    pub last_error: Option<PollFailure>,
    /// Sequence number of the request that produced `job` (0 before the first success)
    pub sequence: u64,
}

impl JobView {
    pub fn logs(&self) -> &[String] {
        self.job.as_ref().map(|job| job.logs.as_slice()).unwrap_or(&[])
    }

    pub fn status(&self) -> Option<JobStatus> {
        self.job.as_ref().map(|job| job.status)
    }

    pub fn report(&self) -> Option<&Report> {
        self.job.as_ref().and_then(|job| job.report.as_ref())
    }

    /// No snapshot received yet
    pub fn is_loading(&self) -> bool {
        self.job.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.job.as_ref().is_some_and(Job::is_terminal)
    }

    /// Applies a successful snapshot requested with `sequence`.
    ///
    /// Returns false, leaving the view untouched, when a newer request has
    /// already been applied.
    pub fn apply_snapshot(&mut self, sequence: u64, job: Job) -> bool {
        if sequence <= self.sequence && self.job.is_some() {
            return false;
        }
        self.job = Some(job);
        self.sequence = sequence;
        self.last_error = None;
        true
    }

    /// Records a failed poll without touching the last good snapshot.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        let consecutive = self
            .last_error
            .as_ref()
            .map(|failure| failure.consecutive + 1)
            .unwrap_or(1);
        self.last_error = Some(PollFailure {
            message: message.into(),
            consecutive,
            at: Utc::now(),
        });
    }
}
