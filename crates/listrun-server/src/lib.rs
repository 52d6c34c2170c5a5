//! listrun Server Library
//!
//! HTTP front-end for the listing automation script. Requests that start
//! work go through the single-task [`listrun_core::RunGuard`]; accepted tasks
//! run on a background tokio task via [`executor::TaskExecutor`] and are
//! observed by polling `/status`.

pub mod config;
pub mod executor;
pub mod http;
pub mod insights;
pub mod output;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ServerConfig;
pub use executor::{ScriptRunner, TaskExecutor, TaskRunner};
pub use state::AppState;
