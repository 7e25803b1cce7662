pub mod types;

use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};
use types::Config;

pub const CONFIG_PATH_ENV: &str = "ACCOMMODATIONS_CONFIG";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ServiceError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` is injected so tests do not have to touch the process environment.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("RESERVATIONS_SERVICE_URL") {
        config.reservations.base_url = url;
    }
    if let Some(url) = lookup("USER_SERVICE_URL") {
        config.users.base_url = url;
    }
    if let Some(addr) = lookup("ACCOMMODATIONS_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
}

pub fn find_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    let candidates = [PathBuf::from("config.yaml"), exe_dir().join("config.yaml")];
    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    PathBuf::from("config.yaml")
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
