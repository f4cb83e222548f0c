//! Request instrumentation.
//!
//! `RequestMetrics` owns the registry plus handles to the two request metrics;
//! `middleware` wires the pre/post hooks into the axum stack.

pub mod middleware;

use std::sync::Arc;

use beacon_core::error::Result;
use beacon_core::metrics::{CounterVec, Histogram, Registry};

use crate::config::MetricsSection;

/// Label names of the request counter, in exposition order.
pub const REQUEST_LABELS: [&str; 3] = ["method", "endpoint", "status"];

pub struct RequestMetrics {
    registry: Registry,
    pub requests: Arc<CounterVec>,
    pub duration: Arc<Histogram>,
}

impl RequestMetrics {
    pub fn new(cfg: &MetricsSection) -> Result<Self> {
        let mut registry = Registry::new();
        let requests = registry.register_counter_vec(
            &format!("{}_requests_total", cfg.prefix),
            "Total HTTP requests",
            &REQUEST_LABELS,
        )?;
        let duration = registry.register_histogram(
            &format!("{}_request_duration_seconds", cfg.prefix),
            "HTTP request duration in seconds",
            &cfg.duration_buckets,
        )?;
        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    /// Render all registered metrics in text exposition format.
    pub fn render(&self) -> String {
        self.registry.render()
    }
}
