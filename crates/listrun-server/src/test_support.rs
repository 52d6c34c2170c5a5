//! Test-only helpers for building application state and reading responses.

use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use listrun_core::TaskRequest;
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::Notify;

use crate::config::ServerConfig;
use crate::executor::{ExecutorError, TaskOutput, TaskRunner};
use crate::state::AppState;

/// Runner that blocks until the gate is opened, then exits 0.
pub struct GatedRunner {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl TaskRunner for GatedRunner {
    async fn run(&self, _request: &TaskRequest) -> Result<TaskOutput, ExecutorError> {
        self.gate.notified().await;
        Ok(TaskOutput {
            exit_code: Some(0),
            ..Default::default()
        })
    }
}

/// Application state rooted in a temporary directory.
pub struct TestApp {
    _dir: TempDir,
    pub state: Arc<AppState>,
    pub gate: Arc<Notify>,
}

impl TestApp {
    /// State whose tasks run until [`TestApp::finish_task`] is called.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::with_base_dir(dir.path());
        config.ensure_directories().unwrap();

        let gate = Arc::new(Notify::new());
        let state = AppState::with_runner(config, Arc::new(GatedRunner { gate: gate.clone() }));
        Self {
            _dir: dir,
            state,
            gate,
        }
    }

    /// Let the running task exit and wait until the guard is free.
    pub async fn finish_task(&self) {
        self.gate.notify_one();
        while self.state.guard.is_running() {
            tokio::task::yield_now().await;
        }
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
