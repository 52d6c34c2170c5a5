//! Status snapshot and task outcome types.

use serde::{Deserialize, Serialize};

use crate::RunId;

/// Point-in-time copy of the run guard's state, handed out to pollers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatus {
    /// Whether a task currently holds the guard.
    pub running: bool,

    /// Task type of the active run. Always `None` while idle.
    pub current_task: Option<String>,

    /// Identifier of the active run. Always `None` while idle.
    pub run_id: Option<RunId>,

    /// 0 when a run starts, 100 once it has been released.
    pub progress: u8,

    /// Number of runs that have released the guard since startup.
    pub runs_completed: u64,

    /// Retained log lines, oldest first.
    pub logs: Vec<String>,
}

impl RunStatus {
    /// Returns true if no task holds the guard.
    pub fn is_idle(&self) -> bool {
        !self.running
    }

    /// Keep only the last `n` log lines.
    pub fn tail(mut self, n: usize) -> Self {
        if self.logs.len() > n {
            self.logs.drain(..self.logs.len() - n);
        }
        self
    }
}

/// Terminal outcome of a single task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskOutcome {
    /// The process exited with code 0.
    Succeeded,
    /// The process could not be launched, timed out, or exited nonzero.
    Failed,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_newest() {
        let status = RunStatus {
            logs: (0..10).map(|i| i.to_string()).collect(),
            ..Default::default()
        };

        let tailed = status.tail(3);
        assert_eq!(tailed.logs, vec!["7", "8", "9"]);
    }

    #[test]
    fn test_tail_shorter_than_limit() {
        let status = RunStatus {
            logs: vec!["only".to_string()],
            ..Default::default()
        };
        assert_eq!(status.tail(50).logs, vec!["only"]);
    }

    #[test]
    fn test_outcome_serializes_screaming_case() {
        let json = serde_json::to_string(&TaskOutcome::Succeeded).unwrap();
        assert_eq!(json, "\"SUCCEEDED\"");
        assert!(!TaskOutcome::Failed.is_success());
    }
}
