use std::net::SocketAddr;

use serde::Deserialize;

use beacon_core::error::{BeaconError, Result};
use beacon_core::metrics::{is_valid_metric_name, validate_buckets, DEFAULT_DURATION_BUCKETS};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            app: AppSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BeaconError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.app.validate()?;
        self.metrics.validate()?;
        Ok(())
    }

    /// `APP_ENV` wins over the file; blank values are ignored.
    pub fn apply_env_overrides(&mut self, environment: Option<String>) {
        if let Some(env) = environment.map(|e| e.trim().to_string()) {
            if !env.is_empty() {
                self.app.environment = env;
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            BeaconError::BadConfig(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    /// Reported by `/health`.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: default_version(),
            environment: default_environment(),
        }
    }
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(BeaconError::BadConfig("app.version must not be empty".into()));
        }
        if self.environment.trim().is_empty() {
            return Err(BeaconError::BadConfig("app.environment must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Prepended to every metric name (`<prefix>_requests_total`).
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Request duration histogram upper bounds, in seconds.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_metric_name(&self.prefix) {
            return Err(BeaconError::BadConfig(format!(
                "metrics.prefix is not a valid metric name: {:?}",
                self.prefix
            )));
        }
        validate_buckets(&self.duration_buckets)
            .map_err(|e| BeaconError::BadConfig(format!("metrics.duration_buckets: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_version() -> String {
    "1.0.0".into()
}
fn default_environment() -> String {
    "production".into()
}
fn default_prefix() -> String {
    "beacon".into()
}
fn default_duration_buckets() -> Vec<f64> {
    DEFAULT_DURATION_BUCKETS.to_vec()
}
