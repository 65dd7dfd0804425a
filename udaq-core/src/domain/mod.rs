//! Core domain types
//!
//! This module contains the domain structures shared by the client, the tracker
//! and the presentation layer. Datasets, jobs and reports are owned by the remote
//! analysis service; the client only ever observes snapshots of them.

pub mod dataset;
pub mod job;
pub mod report;
pub mod view;
