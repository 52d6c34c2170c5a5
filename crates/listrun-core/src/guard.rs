//! Single-task run guard.
//!
//! [`RunGuard`] is the one piece of shared mutable state in listrun. Any
//! number of callers may read it through [`RunGuard::snapshot`], but only
//! the holder of a [`RunPermit`] may have a task in flight. A permit is
//! obtained from [`RunGuard::try_acquire`] and frees the guard exactly once,
//! either through [`RunPermit::release`] or when it is dropped.
//!
//! Every critical section touches a handful of fields and never waits on the
//! task itself, so status polling stays responsive while a task runs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;

use crate::{CoreError, LogBuffer, RunId, RunStatus};

/// Number of log lines retained when no capacity is configured.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

struct GuardState {
    running: bool,
    current_task: Option<String>,
    run_id: Option<RunId>,
    progress: u8,
    runs_completed: u64,
    logs: LogBuffer,
}

impl GuardState {
    fn push_log(&mut self, line: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.logs.push(format!("[{stamp}] {line}"));
    }
}

/// Mutual-exclusion switch for task execution. Cheap to clone; clones share
/// the same state.
#[derive(Clone)]
pub struct RunGuard {
    state: Arc<Mutex<GuardState>>,
}

impl RunGuard {
    /// Create an idle guard retaining at most `log_capacity` log lines.
    pub fn new(log_capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(GuardState {
                running: false,
                current_task: None,
                run_id: None,
                progress: 0,
                runs_completed: 0,
                logs: LogBuffer::new(log_capacity),
            })),
        }
    }

    // Every critical section leaves the state consistent, so a panic while
    // holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempt to start a task.
    ///
    /// Succeeds only when the guard is idle, in which case the guard is marked
    /// running with `progress = 0` and a start line is logged. Under concurrent
    /// calls exactly one caller receives a permit; the rest get
    /// [`CoreError::AlreadyRunning`] and must not retry automatically.
    pub fn try_acquire(&self, task_type: impl Into<String>) -> Result<RunPermit, CoreError> {
        let task_type = task_type.into();
        let mut state = self.lock();

        if state.running {
            return Err(CoreError::AlreadyRunning {
                current: state.current_task.clone().unwrap_or_default(),
            });
        }

        let run_id = RunId::generate();
        state.running = true;
        state.current_task = Some(task_type.clone());
        state.run_id = Some(run_id.clone());
        state.progress = 0;
        state.push_log(&format!("Starting task: {task_type}"));

        Ok(RunPermit {
            guard: self.clone(),
            run_id,
            task_type,
            released: false,
        })
    }

    /// Append a timestamped line to the bounded log.
    pub fn append_log(&self, line: impl AsRef<str>) {
        self.lock().push_log(line.as_ref());
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> RunStatus {
        let state = self.lock();
        RunStatus {
            running: state.running,
            current_task: state.current_task.clone(),
            run_id: state.run_id.clone(),
            progress: state.progress,
            runs_completed: state.runs_completed,
            logs: state.logs.to_vec(),
        }
    }

    /// Returns true if a task currently holds the guard.
    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    fn release(&self) {
        let mut state = self.lock();
        state.running = false;
        state.current_task = None;
        state.run_id = None;
        state.progress = 100;
        state.runs_completed += 1;
    }
}

impl Default for RunGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

/// Proof that the holder owns the run guard.
///
/// Releasing (explicitly or by drop) marks the guard idle with
/// `progress = 100`. Release happens exactly once per permit, including when
/// the owning task unwinds from a panic.
#[must_use = "dropping a RunPermit releases the run guard immediately"]
pub struct RunPermit {
    guard: RunGuard,
    run_id: RunId,
    task_type: String,
    released: bool,
}

impl RunPermit {
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// Append a line to the guard's log on behalf of this run.
    pub fn log(&self, line: impl AsRef<str>) {
        self.guard.append_log(line);
    }

    /// Free the guard.
    pub fn release(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.released {
            self.released = true;
            self.guard.release();
        }
    }
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.finish();
    }
}

impl std::fmt::Debug for RunPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunPermit")
            .field("run_id", &self.run_id)
            .field("task_type", &self.task_type)
            .field("released", &self.released)
            .finish()
    }
}
