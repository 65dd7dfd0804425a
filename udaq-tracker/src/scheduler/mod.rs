//! Scheduler layer
//!
//! This layer polls the analysis service for a job's state and keeps the
//! client-side job view current until the job is terminal or polling is
//! stopped.

pub mod poller;

pub use poller::{JobPoller, PollerHandle, PollerState};
