//! Product config persistence.
//!
//! The product config is a single JSON object on disk. Its shape belongs to
//! the web UI and the automation script, so it is stored as an opaque
//! [`serde_json::Value`].

use std::io;
use std::path::PathBuf;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing the product config.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Config file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Config used when nothing has been saved yet.
pub fn default_product_config() -> Value {
    json!({
        "niche": "funny cat",
        "keyword": "sarcastic cat with coffee",
        "description": "Funny cat design for t-shirt",
        "listings_count": 1
    })
}

/// Reads and writes `product_config.json`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored config, falling back to [`default_product_config`]
    /// when the file does not exist.
    pub async fn load(&self) -> Result<Value, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved config, using defaults");
                Ok(default_product_config())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the stored config with pretty-printed JSON.
    pub async fn save(&self, config: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(config)?;
        tokio::fs::write(&self.path, body).await?;
        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("product_config.json"));

        let config = store.load().await.unwrap();
        assert_eq!(config["niche"], "funny cat");
        assert_eq!(config["listings_count"], 1);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("product_config.json");
        let store = ConfigStore::new(&path);

        let config = json!({"niche": "dog lover", "tags": ["dog", "gift"]});
        store.save(&config).await.unwrap();

        assert_eq!(store.load().await.unwrap(), config);
        // Pretty-printed on disk.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"niche\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product_config.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = ConfigStore::new(&path).load().await;
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
