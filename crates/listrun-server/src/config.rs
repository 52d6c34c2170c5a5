//! Server configuration.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use listrun_core::DEFAULT_LOG_CAPACITY;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// Application root. The automation command runs from here.
    pub base_dir: PathBuf,

    /// Holds `product_config.json` and the `.env` credentials file.
    pub config_dir: PathBuf,

    /// Generated artifacts (designs, mockups, videos, drafts).
    pub output_dir: PathBuf,

    /// Log directory created at startup for the automation script.
    pub logs_dir: PathBuf,

    /// Program launched for every task.
    pub task_program: String,

    /// Arguments passed to `task_program`.
    pub task_args: Vec<String>,

    /// Kill the task process if it runs longer than this.
    pub task_timeout: Option<Duration>,

    /// Number of status log lines retained.
    pub log_capacity: usize,
}

impl ServerConfig {
    /// Build a config rooted at `base_dir`, deriving the standard
    /// subdirectories from it.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_dir: base_dir.join("config"),
            output_dir: base_dir.join("output"),
            logs_dir: base_dir.join("logs"),
            base_dir,
            ..Self::default()
        }
    }

    /// Path of the persisted product config.
    pub fn product_config_path(&self) -> PathBuf {
        self.config_dir.join("product_config.json")
    }

    /// Path of the credentials file whose presence marks the app configured.
    pub fn env_file_path(&self) -> PathBuf {
        self.config_dir.join(".env")
    }

    /// Create the logs, output and config directories if missing.
    pub fn ensure_directories(&self) -> io::Result<()> {
        for dir in [&self.logs_dir, &self.output_dir, &self.config_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let base_dir = PathBuf::from(".");
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            config_dir: base_dir.join("config"),
            output_dir: base_dir.join("output"),
            logs_dir: base_dir.join("logs"),
            base_dir,
            task_program: "python".to_string(),
            task_args: vec!["etsy_ai_factory.py".to_string()],
            task_timeout: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_dir_derives_subdirectories() {
        let config = ServerConfig::with_base_dir("/srv/app");

        assert_eq!(config.config_dir, PathBuf::from("/srv/app/config"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/app/output"));
        assert_eq!(config.logs_dir, PathBuf::from("/srv/app/logs"));
        assert_eq!(
            config.product_config_path(),
            PathBuf::from("/srv/app/config/product_config.json")
        );
        assert_eq!(config.task_program, "python");
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::with_base_dir(dir.path());

        config.ensure_directories().unwrap();
        // Idempotent.
        config.ensure_directories().unwrap();

        assert!(dir.path().join("config").is_dir());
        assert!(dir.path().join("output").is_dir());
        assert!(dir.path().join("logs").is_dir());
    }
}
