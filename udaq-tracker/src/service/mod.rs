//! Service layer
//!
//! Services hold the submission logic. They orchestrate repository calls and
//! are constructed with an explicit repository so tests can inject doubles.

mod upload;

pub use upload::UploadOrchestrator;
