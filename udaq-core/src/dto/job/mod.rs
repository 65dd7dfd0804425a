//! Job DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::dataset::DatasetId;
use crate::domain::job::JobId;

/// Request body of `POST /jobs/start_job/`
#[derive(Debug, Clone, Serialize)]
pub struct StartJobRequest {
    pub dataset_id: DatasetId,
}

/// Response body of `POST /jobs/start_job/`
#[derive(Debug, Clone, Deserialize)]
pub struct JobCreated {
    pub id: JobId,
}

/// Raw response body of `GET /jobs/{id}/`
///
/// Every field is optional here; presence and shape are checked during
/// normalization rather than trusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPayload {
    #[serde(default)]
    pub id: Option<Value>,
    /// Dataset reference, a bare id or an object carrying one
    #[serde(default)]
    pub dataset: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    /// Serialized log blob, normally a JSON array encoded as a string
    #[serde(default)]
    pub logs: Option<Value>,
    /// Kept raw so a malformed report cannot reject the whole snapshot
    #[serde(default)]
    pub report: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

/// Raw report as attached to a job payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPayload {
    #[serde(default)]
    pub initial_quality_score: Option<f64>,
    #[serde(default)]
    pub final_quality_score: Option<f64>,
    #[serde(default)]
    pub issues_found: Option<Value>,
    #[serde(default)]
    pub actions_taken: Option<Value>,
    #[serde(default)]
    pub cleaned_file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_job_request_body() {
        let body = serde_json::to_value(StartJobRequest {
            dataset_id: DatasetId::new("9"),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "dataset_id": "9" }));
    }

    #[test]
    fn test_job_payload_tolerates_extra_and_missing_fields() {
        let payload: JobPayload = serde_json::from_str(
            r#"{"id": 3, "status": "PENDING", "dataset": 1, "unexpected": true, "report": null}"#,
        )
        .unwrap();
        assert_eq!(payload.id, Some(serde_json::json!(3)));
        assert_eq!(payload.status.as_deref(), Some("PENDING"));
        assert!(payload.logs.is_none());
        assert!(payload.report.is_none());
    }

    #[test]
    fn test_job_payload_accepts_unexpected_metadata_types() {
        let payload: JobPayload = serde_json::from_str(
            r#"{"id": [4], "status": "COMPLETED", "dataset": {"id": 1}, "updated_at": 1767607200}"#,
        )
        .unwrap();
        assert_eq!(payload.status.as_deref(), Some("COMPLETED"));
        assert_eq!(payload.updated_at, Some(serde_json::json!(1767607200)));
    }
}
