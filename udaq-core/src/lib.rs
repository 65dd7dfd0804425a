//! UDA-Q Core
//!
//! Core types for the UDA-Q data-quality client.
//!
//! This crate contains:
//! - Domain types: Dataset, Job, Report and the client-side job view
//! - DTOs: wire payloads exchanged with the analysis service
//! - Normalization: validation of raw job payloads into domain types

pub mod domain;
pub mod dto;
pub mod normalize;
