//! Shared application state.

use std::sync::Arc;

use listrun_core::{CoreError, RunGuard, RunPermit, TaskRequest};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::executor::{ScriptRunner, TaskExecutor, TaskRunner};
use crate::store::{ConfigStore, StoreError};

/// Reasons a task that persists its product config could not start.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to save product config: {0}")]
    Store(#[from] StoreError),
}

/// Shared application state, handed to every handler through axum `State`.
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,

    /// Single-task run guard.
    pub guard: RunGuard,

    /// Runs approved tasks in the background.
    pub executor: TaskExecutor,

    /// Product config persistence.
    pub store: ConfigStore,
}

impl AppState {
    /// Create state that runs tasks with the configured automation command.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let runner = ScriptRunner::from_config(&config);
        Self::with_runner(config, Arc::new(runner))
    }

    /// Create state with a custom task runner.
    pub fn with_runner(config: ServerConfig, runner: Arc<dyn TaskRunner>) -> Arc<Self> {
        Arc::new(Self {
            guard: RunGuard::new(config.log_capacity),
            executor: TaskExecutor::new(runner),
            store: ConfigStore::new(config.product_config_path()),
            config,
        })
    }

    /// Acquire the guard for `request` and hand it to the executor.
    ///
    /// Returns as soon as the task is spawned. Fails with
    /// [`CoreError::AlreadyRunning`] when another task holds the guard.
    pub fn start_task(&self, request: TaskRequest) -> Result<(), CoreError> {
        request.validate()?;
        let permit = self.guard.try_acquire(request.task_type.clone())?;
        self.launch(permit, request);
        Ok(())
    }

    /// Like [`AppState::start_task`], but writes `config` to the product
    /// config file while holding the guard.
    ///
    /// A request refused with [`CoreError::AlreadyRunning`] leaves the file
    /// untouched. If the write fails the guard is released and no task runs.
    pub async fn start_task_with_config(
        &self,
        request: TaskRequest,
        config: &Value,
    ) -> Result<(), StartError> {
        request.validate()?;
        let permit = self.guard.try_acquire(request.task_type.clone())?;

        if let Err(e) = self.store.save(config).await {
            error!(run_id = %permit.run_id(), error = %e, "Failed to save product config");
            permit.log(format!("Task {} failed: {e}", request.task_type));
            permit.release();
            return Err(e.into());
        }
        info!(run_id = %permit.run_id(), "Product config saved");

        self.launch(permit, request);
        Ok(())
    }

    fn launch(&self, permit: RunPermit, request: TaskRequest) {
        info!(run_id = %permit.run_id(), task_type = %request.task_type, "Task accepted");
        // The executor reports through the guard; the handle is not needed.
        drop(self.executor.spawn(permit, request));
    }
}
