//! HTTP request handlers.

mod config;
mod health;
mod insights;
mod oauth;
mod output;
mod status;
mod tasks;

pub use config::{get_config, save_config};
pub use health::{health_check, index};
pub use insights::{analyze_competitors, niche_suggestions};
pub use oauth::oauth_callback;
pub use output::{download_output, list_output};
pub use status::{app_status, logs, run_status};
pub use tasks::{analyze_niche, create_listings, start_task};
