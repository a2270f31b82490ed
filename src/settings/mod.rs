mod environment;
mod global_config;
pub mod global_user;
pub mod metrics;

use std::env;

pub use environment::Environment;
pub use global_config::{get_global_config_path, get_wrangler_home_dir, DEFAULT_CONFIG_FILE_NAME};

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Base URL of the Cloudflare v4 API, overridable with `CF_API_BASE_URL`.
pub fn api_base_url() -> String {
    env::var("CF_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}
