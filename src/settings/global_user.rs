use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat, Source};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionsError};
use crate::settings::{get_global_config_path, Environment};

/// Credentials used to authenticate against the Cloudflare API.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum GlobalUser {
    TokenAuth { api_token: String },
    GlobalKeyAuth { email: String, api_key: String },
}

impl GlobalUser {
    pub fn new() -> Result<Self> {
        let config_path = get_global_config_path()?;
        GlobalUser::build(Environment::credentials(), &config_path)
    }

    // Environment variables take precedence over the config file, and an
    // API token takes precedence over a global key.
    fn build<T: 'static + Source + Send + Sync>(environment: T, config_path: &Path) -> Result<Self> {
        let mut builder = Config::builder();
        if config_path.exists() {
            log::info!("Reading credentials from {}", config_path.display());
            builder = builder.add_source(File::from(PathBuf::from(config_path)).format(FileFormat::Toml));
        }
        let config = builder.add_source(environment).build()?;

        config.try_deserialize().map_err(|_| {
            VersionsError::Usage(format!(
                "No credentials found. Set CF_API_TOKEN (or CF_EMAIL and CF_API_KEY), or add them to {}",
                config_path.display()
            ))
        })
    }
}
