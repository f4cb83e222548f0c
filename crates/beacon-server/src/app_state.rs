//! Shared application state for the Beacon server.

use std::sync::Arc;

use beacon_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::RequestMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    metrics: RequestMetrics,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle metric registration errors without panicking.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let metrics = RequestMetrics::new(&cfg.metrics)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &RequestMetrics {
        &self.inner.metrics
    }
}
