use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionsError};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "default.toml";

pub fn get_wrangler_home_dir() -> Result<PathBuf> {
    if let Ok(value) = env::var("WRANGLER_HOME") {
        log::info!("Using $WRANGLER_HOME: {}", value);
        Ok(Path::new(&value).to_path_buf())
    } else {
        log::info!("No $WRANGLER_HOME detected, using $HOME");
        dirs::home_dir()
            .map(|home| home.join(".wrangler"))
            .ok_or_else(|| VersionsError::Usage("Could not find home directory".to_string()))
    }
}

pub fn get_global_config_path() -> Result<PathBuf> {
    let home_dir = get_wrangler_home_dir()?;
    let global_config_file = home_dir.join("config").join(DEFAULT_CONFIG_FILE_NAME);
    log::info!("Using global config file: {}", global_config_file.display());
    Ok(global_config_file)
}
