//! Data Transfer Objects for the analysis service API
//!
//! Payloads here mirror the wire format as the service sends it. Response
//! bodies are deliberately loose (`Option`, raw `serde_json::Value`) and are
//! turned into domain types by [`crate::normalize`].

pub mod dataset;
pub mod job;
