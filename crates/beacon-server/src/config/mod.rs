//! Server config loader (strict parsing + env overrides).

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use beacon_core::error::{BeaconError, Result};

pub use schema::{AppSection, MetricsSection, ServerConfig, ServerSection};

/// Env var selecting the config file path.
pub const CONFIG_PATH_ENV: &str = "BEACON_CONFIG";
/// Env var selecting the deployment-environment label.
pub const ENVIRONMENT_ENV: &str = "APP_ENV";
/// Config file used when `BEACON_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "beacon.yaml";

/// Resolve the config path from the environment and load it.
/// A missing file yields defaults; a present but invalid file is an error.
pub fn load() -> Result<ServerConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = load_optional(&path)?;
    cfg.apply_env_overrides(std::env::var(ENVIRONMENT_ENV).ok());
    cfg.validate()?;
    Ok(cfg)
}

fn load_optional(path: &str) -> Result<ServerConfig> {
    match fs::read_to_string(Path::new(path)) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found; using defaults");
            Ok(ServerConfig::default())
        }
        Err(e) => Err(BeaconError::BadConfig(format!("read config {path} failed: {e}"))),
    }
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BeaconError::BadConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| BeaconError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
