//! Task execution.
//!
//! A [`TaskExecutor`] takes a [`RunPermit`] plus the [`TaskRequest`] it was
//! granted for, runs the request on a tokio task, and releases the permit when
//! the run ends. The HTTP caller that triggered the run never sees the outcome;
//! it is recorded in the guard's log and observed by polling `/status`.
//!
//! The process boundary is behind the [`TaskRunner`] trait. [`ScriptRunner`]
//! launches the configured automation command; tests substitute fakes.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use listrun_core::{RunPermit, TaskOutcome, TaskRequest};
use thiserror::Error;
use tokio::process::Command;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;

/// Errors raised while launching or waiting for a task process.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Failed to spawn task process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed waiting for task process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Task process timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Task runner aborted: {0}")]
    Aborted(#[source] JoinError),
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TaskOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable reason for a failed run: stderr verbatim when present.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs the work described by a [`TaskRequest`].
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, request: &TaskRequest) -> Result<TaskOutput, ExecutorError>;
}

/// Runs the automation script as a child process.
///
/// The task type and parameters are passed in the `LISTRUN_TASK_TYPE` and
/// `LISTRUN_TASK_PARAMS` environment variables. Output is captured in full
/// once the process exits.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ScriptRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Build the runner described by the server config.
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut runner = Self::new(&config.task_program)
            .with_args(config.task_args.iter().cloned())
            .with_working_dir(&config.base_dir);
        runner.timeout = config.task_timeout;
        runner
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl TaskRunner for ScriptRunner {
    async fn run(&self, request: &TaskRequest) -> Result<TaskOutput, ExecutorError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env("LISTRUN_TASK_TYPE", &request.task_type)
            .env("LISTRUN_TASK_PARAMS", request.params_json())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program, args = ?self.args, "Spawning task process");

        let child = cmd.spawn().map_err(ExecutorError::Spawn)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ExecutorError::Timeout(limit))?,
            None => child.wait_with_output().await,
        }
        .map_err(ExecutorError::Wait)?;

        Ok(TaskOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Hands approved requests to a [`TaskRunner`] on a background tokio task.
#[derive(Clone)]
pub struct TaskExecutor {
    runner: Arc<dyn TaskRunner>,
}

impl TaskExecutor {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        Self { runner }
    }

    /// Run `request` in the background and release `permit` when it ends.
    ///
    /// Returns immediately. The permit is released on every exit path. A
    /// panic inside the runner is reported as a failed run.
    pub fn spawn(&self, permit: RunPermit, request: TaskRequest) -> JoinHandle<TaskOutcome> {
        let runner = self.runner.clone();
        tokio::spawn(async move { run_to_completion(runner, permit, request).await })
    }
}

/// Run the request on its own tokio task so a panicking runner surfaces as a
/// [`JoinError`] instead of unwinding through the permit holder.
async fn run_isolated(
    runner: Arc<dyn TaskRunner>,
    request: &TaskRequest,
) -> Result<TaskOutput, ExecutorError> {
    let request = request.clone();
    tokio::spawn(async move { runner.run(&request).await })
        .await
        .unwrap_or_else(|e| Err(ExecutorError::Aborted(e)))
}

async fn run_to_completion(
    runner: Arc<dyn TaskRunner>,
    permit: RunPermit,
    request: TaskRequest,
) -> TaskOutcome {
    let task_type = request.task_type.as_str();
    info!(
        run_id = %permit.run_id(),
        task_type = %task_type,
        params = %request.params_json(),
        "Task started"
    );

    let outcome = match run_isolated(runner, &request).await {
        Ok(output) if output.success() => {
            info!(run_id = %permit.run_id(), task_type = %task_type, "Task completed");
            permit.log(format!("Task {task_type} completed successfully"));
            TaskOutcome::Succeeded
        }
        Ok(output) => {
            let detail = output.failure_detail();
            warn!(
                run_id = %permit.run_id(),
                task_type = %task_type,
                exit_code = ?output.exit_code,
                stderr = %detail,
                "Task process failed"
            );
            permit.log(format!("Task {task_type} failed: {detail}"));
            TaskOutcome::Failed
        }
        Err(e) => {
            error!(run_id = %permit.run_id(), task_type = %task_type, error = %e, "Task could not run");
            permit.log(format!("Task {task_type} failed: {e}"));
            TaskOutcome::Failed
        }
    };

    permit.release();
    outcome
}
