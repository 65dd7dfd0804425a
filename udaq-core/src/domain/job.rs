//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dataset::DatasetId;
use super::report::Report;

/// Identifier as it appears on the wire
///
/// The service emits integer primary keys, but nothing in the contract promises
/// that, so both numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Number(u64),
    Text(String),
}

impl OpaqueId {
    pub fn into_string(self) -> String {
        match self {
            OpaqueId::Number(n) => n.to_string(),
            OpaqueId::Text(s) => s,
        }
    }
}

/// Identifier assigned to a job by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OpaqueId", into = "String")]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<OpaqueId> for JobId {
    fn from(id: OpaqueId) -> Self {
        Self(id.into_string())
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Parses the wire representation (`PENDING`, `RUNNING`, ...)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(JobStatus::Pending),
            "RUNNING" => Some(JobStatus::Running),
            "COMPLETED" => Some(JobStatus::Completed),
            "FAILED" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
        }
    }

    /// `COMPLETED` and `FAILED` are terminal: no further transitions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated snapshot of a job
///
/// Jobs are mutated only by the service. Each successful poll yields a fresh
/// snapshot; the client never edits one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub dataset: Option<DatasetId>,
    pub status: JobStatus,
    /// Decoded progress log, oldest entry first
    pub logs: Vec<String>,
    /// Present only when `status` is `COMPLETED`
    pub report: Option<Report>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_accepts_numbers_and_strings() {
        let numeric: JobId = serde_json::from_str("42").unwrap();
        let textual: JobId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, textual);
        assert_eq!(numeric.as_str(), "42");
    }

    #[test]
    fn test_job_id_serializes_as_string() {
        let id = JobId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_status_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(JobStatus::parse("RUNNING"), Some(JobStatus::Running));
        assert_eq!(JobStatus::parse("running"), None);
        assert_eq!(JobStatus::parse("CANCELLED"), None);
    }
}
