//! Normalization of raw job payloads
//!
//! The analysis service returns loosely typed JSON. Everything that reaches the
//! presentation layer goes through [`normalize_job`] first:
//! - an unknown or missing status rejects the snapshot
//! - a log blob that cannot be decoded becomes an empty log
//! - a report is kept only for completed jobs, and only if it carries both scores

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::dataset::DatasetId;
use crate::domain::job::{Job, JobId, JobStatus, OpaqueId};
use crate::domain::report::Report;
use crate::dto::job::{JobPayload, ReportPayload};

/// A job payload that cannot be turned into a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("job payload has no status")]
    MissingStatus,

    #[error("unknown job status: {0:?}")]
    UnknownStatus(String),
}

/// The log blob could not be decoded into a list of strings
///
/// Never leaves this module: [`normalize_job`] substitutes an empty log.
#[derive(Debug, Error)]
pub enum LogDecodeError {
    #[error("log blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("log blob has unexpected shape: expected a list of strings")]
    Shape,
}

/// Decodes the serialized log field into an ordered list of lines
///
/// Accepts the service's JSON-encoded string (`"[\"a\", \"b\"]"`) and, leniently,
/// an already-decoded array. Absent, null and empty-string logs are empty.
pub fn decode_logs(raw: Option<&Value>) -> Result<Vec<String>, LogDecodeError> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(blob)) if blob.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(blob)) => {
            let decoded: Value = serde_json::from_str(blob)?;
            lines_from_array(&decoded)
        }
        Some(value) if value.is_array() => lines_from_array(value),
        Some(_) => Err(LogDecodeError::Shape),
    }
}

fn lines_from_array(value: &Value) -> Result<Vec<String>, LogDecodeError> {
    let Value::Array(items) = value else {
        return Err(LogDecodeError::Shape);
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or(LogDecodeError::Shape))
        .collect()
}

/// Validates a raw payload fetched for `requested`
pub fn normalize_job(requested: &JobId, payload: JobPayload) -> Result<Job, NormalizeError> {
    let raw_status = payload.status.ok_or(NormalizeError::MissingStatus)?;
    let status =
        JobStatus::parse(&raw_status).ok_or_else(|| NormalizeError::UnknownStatus(raw_status))?;

    let logs = decode_logs(payload.logs.as_ref()).unwrap_or_else(|e| {
        debug!(job_id = %requested, "Discarding undecodable job log: {}", e);
        Vec::new()
    });

    let report = match (status, payload.report) {
        (_, None) | (_, Some(Value::Null)) => None,
        (JobStatus::Completed, Some(raw)) => normalize_report(requested, raw),
        (status, Some(_)) => {
            debug!(job_id = %requested, %status, "Ignoring report on non-completed job");
            None
        }
    };

    let id = payload.id.and_then(opaque_id).map(JobId::from);
    if let Some(id) = id.as_ref().filter(|id| *id != requested) {
        warn!(
            job_id = %requested,
            "Service answered with a different job id: {}",
            id
        );
    }

    Ok(Job {
        id: id.unwrap_or_else(|| requested.clone()),
        dataset: payload.dataset.and_then(dataset_ref),
        status,
        logs,
        report,
        created_at: parse_timestamp(payload.created_at.as_ref()),
        updated_at: parse_timestamp(payload.updated_at.as_ref()),
    })
}

fn opaque_id(raw: Value) -> Option<OpaqueId> {
    serde_json::from_value(raw).ok()
}

/// A dataset reference is either a bare id or an object with an `id` field
fn dataset_ref(raw: Value) -> Option<DatasetId> {
    let raw = match raw {
        Value::Object(mut fields) => fields.remove("id")?,
        other => other,
    };
    opaque_id(raw).map(DatasetId::from)
}

fn normalize_report(job_id: &JobId, raw: Value) -> Option<Report> {
    let payload: ReportPayload = match serde_json::from_value(raw) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(%job_id, "Dropping malformed report: {}", e);
            return None;
        }
    };

    let (Some(initial), Some(final_score)) =
        (payload.initial_quality_score, payload.final_quality_score)
    else {
        warn!(%job_id, "Dropping report without quality scores");
        return None;
    };

    let report = Report {
        initial_quality_score: initial,
        final_quality_score: final_score,
        issues_found: issue_counts(job_id, payload.issues_found),
        actions_taken: action_list(payload.actions_taken),
        cleaned_file_path: payload
            .cleaned_file_path
            .filter(|path| !path.trim().is_empty()),
    };

    if report.is_regression() {
        warn!(
            %job_id,
            "Report anomaly: final score {} below initial score {}",
            report.final_quality_score, report.initial_quality_score
        );
    }
    if !report.scores_in_range() {
        warn!(%job_id, "Report anomaly: quality score outside 0-100");
    }

    Some(report)
}

fn issue_counts(job_id: &JobId, raw: Option<Value>) -> BTreeMap<String, u64> {
    let Some(Value::Object(entries)) = raw else {
        return BTreeMap::new();
    };
    entries
        .into_iter()
        .filter_map(|(kind, count)| match count.as_u64() {
            Some(n) => Some((kind, n)),
            None => {
                debug!(%job_id, "Skipping issue {:?} with non-count value {}", kind, count);
                None
            }
        })
        .collect()
}

fn action_list(raw: Option<Value>) -> Vec<String> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(action) => Some(action),
            _ => None,
        })
        .collect()
}

fn parse_timestamp(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    raw.and_then(Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|ts| ts.with_timezone(&Utc))
}
