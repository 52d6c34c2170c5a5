//! listrun HTTP server.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use listrun_core::DEFAULT_LOG_CAPACITY;
use listrun_server::{http, AppState, ServerConfig};

/// Web front-end for the listing automation script.
#[derive(Parser, Debug)]
#[command(name = "listrun-server", about = "Run listing automation tasks over HTTP")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Application root containing the automation script
    #[arg(long, env = "LISTRUN_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Program run for every task [default: python etsy_ai_factory.py]
    #[arg(long, env = "LISTRUN_TASK_PROGRAM")]
    task_program: Option<String>,

    /// One argument for the task program, passed verbatim (repeat for more)
    #[arg(long = "task-arg", value_name = "ARG", allow_hyphen_values = true)]
    task_args: Vec<String>,

    /// Kill a task that runs longer than this many seconds
    #[arg(long, env = "LISTRUN_TASK_TIMEOUT_SECS")]
    task_timeout_secs: Option<u64>,

    /// Number of status log lines to retain
    #[arg(long, env = "LISTRUN_LOG_CAPACITY", default_value_t = DEFAULT_LOG_CAPACITY)]
    log_capacity: usize,

    /// Enable debug logging
    #[arg(long, env = "DEBUG")]
    debug: bool,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig, String> {
        let mut config = ServerConfig::with_base_dir(self.base_dir);

        match self.task_program {
            Some(program) if program.trim().is_empty() => {
                return Err("--task-program must not be blank".to_string());
            }
            Some(program) => {
                config.task_program = program;
                config.task_args = self.task_args;
            }
            None if !self.task_args.is_empty() => config.task_args = self.task_args,
            None => {}
        }

        Ok(ServerConfig {
            bind_addr: format!("{}:{}", self.host, self.port),
            task_timeout: self.task_timeout_secs.map(Duration::from_secs),
            log_capacity: self.log_capacity,
            ..config
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "listrun=debug,tower_http=debug"
    } else {
        "listrun=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .init();

    let config = args.into_config()?;
    config.ensure_directories().map_err(|e| {
        format!(
            "Failed to create directories under '{}': {}",
            config.base_dir.display(),
            e
        )
    })?;

    info!(
        bind_addr = %config.bind_addr,
        base_dir = %config.base_dir.display(),
        task_program = %config.task_program,
        task_args = ?config.task_args,
        "Starting listrun server"
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    let router = http::create_router(AppState::new(config));

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("listrun server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_program_and_args() {
        let args = Args::try_parse_from([
            "listrun-server",
            "--port",
            "8080",
            "--base-dir",
            "/srv/app",
            "--task-program",
            "node",
            "--task-arg",
            "run.js",
            "--task-arg",
            "--shop=My Shop",
            "--task-timeout-secs",
            "60",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.task_program, "node");
        assert_eq!(config.task_args, vec!["run.js", "--shop=My Shop"]);
        assert_eq!(config.task_timeout, Some(Duration::from_secs(60)));
        assert!(config.bind_addr.ends_with(":8080"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/app/output"));
    }

    #[test]
    fn test_program_without_args_drops_default_script() {
        let args = Args::try_parse_from(["listrun-server", "--task-program", "./run.sh"]).unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.task_program, "./run.sh");
        assert!(config.task_args.is_empty());
    }

    #[test]
    fn test_default_task_command() {
        let config = Args::try_parse_from(["listrun-server"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.task_program, "python");
        assert_eq!(config.task_args, vec!["etsy_ai_factory.py"]);

        let config = Args::try_parse_from(["listrun-server", "--task-arg", "my script.py"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.task_program, "python");
        assert_eq!(config.task_args, vec!["my script.py"]);
    }

    #[test]
    fn test_blank_task_program_is_rejected() {
        let args = Args::try_parse_from(["listrun-server", "--task-program", " "]).unwrap();
        assert!(args.into_config().is_err());
    }
}
