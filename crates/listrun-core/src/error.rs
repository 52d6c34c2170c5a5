//! Core domain errors.

use thiserror::Error;

/// Core domain errors for listrun.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A task is already holding the run guard.
    #[error("already running")]
    AlreadyRunning {
        /// Task type of the run currently holding the guard.
        current: String,
    },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
