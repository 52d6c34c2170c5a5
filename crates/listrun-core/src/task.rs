//! Task requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CoreError;

/// A request to run one task. Immutable once handed to the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Kind of work, e.g. `create_listings` or `analyze_niche`.
    pub task_type: String,

    /// Free-form parameters forwarded to the automation process.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl TaskRequest {
    /// Create a request with no parameters.
    pub fn new(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            params: Map::new(),
        }
    }

    /// Builder method to add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Reject requests that cannot name a task.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.task_type.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "task_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parameters encoded as a JSON object string.
    pub fn params_json(&self) -> String {
        Value::Object(self.params.clone()).to_string()
    }
}
