//! listrun Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Async runtime specifics
//! - The automation script being run
//!
//! The central type is [`RunGuard`], which serializes task execution so that
//! at most one automation task runs at a time while any number of callers
//! poll its status.

pub mod error;
pub mod guard;
pub mod ids;
pub mod log;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use guard::{RunGuard, RunPermit, DEFAULT_LOG_CAPACITY};
pub use ids::RunId;
pub use log::LogBuffer;
pub use status::{RunStatus, TaskOutcome};
pub use task::TaskRequest;
