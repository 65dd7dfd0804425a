//! Repository layer
//!
//! Repositories abstract communication with the analysis service. They carry
//! no tracking logic; the orchestrator and poller depend on the trait so tests
//! can substitute scripted implementations.

mod jobs;

pub use jobs::HttpJobRepository;
pub use jobs::JobRepository;
