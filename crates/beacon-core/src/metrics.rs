//! Minimal metrics registry with Prometheus text exposition.
//!
//! Counter vectors carry an ordered set of label names; each unique tuple of
//! label values gets its own `AtomicU64` in a `DashMap`. Histograms are
//! unlabeled, with fixed bucket bounds chosen at construction. Durations are
//! accumulated as integer nanoseconds so every update is a single atomic add;
//! rendering converts back to seconds.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::error::{BeaconError, Result};

/// Content type of the text exposition format (version 0.0.4).
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Default latency buckets in seconds: 0.5ms .. 10s.
pub const DEFAULT_DURATION_BUCKETS: [f64; 14] = [
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, and not the reserved `__` prefix or `le`.
fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !name.starts_with("__") && name != "le"
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// Counter partitioned by an ordered set of label names.
#[derive(Debug)]
pub struct CounterVec {
    name: String,
    help: String,
    label_names: Vec<String>,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub fn new(name: &str, help: &str, label_names: &[&str]) -> Result<Self> {
        if !is_valid_metric_name(name) {
            return Err(BeaconError::BadMetric(format!("invalid metric name: {name:?}")));
        }
        for l in label_names {
            if !is_valid_label_name(l) {
                return Err(BeaconError::BadMetric(format!(
                    "invalid label name {l:?} on metric {name}"
                )));
            }
        }
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            map: DashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Increment by 1. `values` must follow the declared label order.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        if values.len() != self.label_names.len() {
            return Err(BeaconError::BadMetric(format!(
                "{} expects {} label values, got {}",
                self.name,
                self.label_names.len(),
                values.len()
            )));
        }
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value for a label tuple (0 if never observed).
    pub fn get(&self, values: &[&str]) -> u64 {
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format. Series are sorted for stable output.
    fn render(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, "counter");

        let mut series: Vec<(Vec<String>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        series.sort();

        for (values, val) in series {
            if values.is_empty() {
                let _ = writeln!(out, "{} {}", self.name, val);
                continue;
            }
            let label_str = self
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, val);
        }
    }
}

/// Unlabeled histogram over durations.
///
/// Buckets are stored non-cumulatively (one atomic add per observation) and
/// accumulated at render time.
#[derive(Debug)]
pub struct Histogram {
    name: String,
    help: String,
    bounds_secs: Vec<f64>,
    bounds_nanos: Vec<u64>,
    buckets: Vec<AtomicU64>,
    count: AtomicU64,
    sum_nanos: AtomicU64,
}

impl Histogram {
    /// `bounds` are upper bounds in seconds; must be non-empty, finite,
    /// positive and strictly ascending.
    pub fn new(name: &str, help: &str, bounds: &[f64]) -> Result<Self> {
        if !is_valid_metric_name(name) {
            return Err(BeaconError::BadMetric(format!("invalid metric name: {name:?}")));
        }
        validate_buckets(bounds)?;
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            bounds_secs: bounds.to_vec(),
            bounds_nanos: bounds.iter().map(|b| secs_to_nanos(*b)).collect(),
            buckets: bounds.iter().map(|_| AtomicU64::new(0)).collect(),
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observe(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_nanos.fetch_add(nanos, Ordering::Relaxed);

        // First bucket whose bound is >= value; beyond the last bound only +Inf applies.
        let idx = self.bounds_nanos.partition_point(|&b| b < nanos);
        if let Some(bucket) = self.buckets.get(idx) {
            bucket.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum_seconds(&self) -> f64 {
        self.sum_nanos.load(Ordering::Relaxed) as f64 / 1_000_000_000.0
    }

    /// Cumulative counts, one per bound (excluding +Inf).
    pub fn cumulative_counts(&self) -> Vec<u64> {
        let mut acc = 0;
        self.buckets
            .iter()
            .map(|b| {
                acc += b.load(Ordering::Relaxed);
                acc
            })
            .collect()
    }

    fn render(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, "histogram");

        let cumulative = self.cumulative_counts();
        for (le, c) in self.bounds_secs.iter().zip(cumulative.iter()) {
            let _ = writeln!(out, "{}_bucket{{le=\"{}\"}} {}", self.name, le, c);
        }
        // Read after buckets: count is bumped first on write, so it never trails them.
        let count = self
            .count()
            .max(cumulative.last().copied().unwrap_or(0));
        let _ = writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", self.name, count);
        let _ = writeln!(out, "{}_sum {}", self.name, self.sum_seconds());
        let _ = writeln!(out, "{}_count {}", self.name, count);
    }
}

/// Seconds to whole nanoseconds, saturating at `u64::MAX`.
fn secs_to_nanos(secs: f64) -> u64 {
    (secs * 1_000_000_000.0).round() as u64
}

/// Validate histogram bucket bounds (seconds).
///
/// Bounds are compared in nanoseconds, so they must also stay distinct and
/// non-zero at that resolution.
pub fn validate_buckets(bounds: &[f64]) -> Result<()> {
    if bounds.is_empty() {
        return Err(BeaconError::BadMetric("histogram buckets must not be empty".into()));
    }
    if bounds.iter().any(|b| !b.is_finite() || *b <= 0.0) {
        return Err(BeaconError::BadMetric(
            "histogram buckets must be finite and positive".into(),
        ));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(BeaconError::BadMetric(
            "histogram buckets must be strictly ascending".into(),
        ));
    }
    let nanos: Vec<u64> = bounds.iter().map(|b| secs_to_nanos(*b)).collect();
    if nanos.first() == Some(&0) || nanos.windows(2).any(|w| w[0] >= w[1]) {
        return Err(BeaconError::BadMetric(
            "histogram buckets must be distinct at nanosecond resolution".into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum Registered {
    Counter(Arc<CounterVec>),
    Histogram(Arc<Histogram>),
}

impl Registered {
    fn name(&self) -> &str {
        match self {
            Registered::Counter(c) => c.name(),
            Registered::Histogram(h) => h.name(),
        }
    }
}

/// Ordered collection of metrics rendered together on `/metrics`.
///
/// Registration takes `&mut self` and happens once at startup; afterwards the
/// registry is shared read-only (usually behind an `Arc`) and all updates go
/// through the returned handles.
#[derive(Debug, Default)]
pub struct Registry {
    metrics: Vec<Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.metrics.iter().any(|m| m.name() == name) {
            return Err(BeaconError::BadMetric(format!("duplicate metric name: {name}")));
        }
        Ok(())
    }

    pub fn register_counter_vec(
        &mut self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterVec>> {
        self.ensure_unique(name)?;
        let c = Arc::new(CounterVec::new(name, help, label_names)?);
        self.metrics.push(Registered::Counter(Arc::clone(&c)));
        Ok(c)
    }

    pub fn register_histogram(
        &mut self,
        name: &str,
        help: &str,
        bounds: &[f64],
    ) -> Result<Arc<Histogram>> {
        self.ensure_unique(name)?;
        let h = Arc::new(Histogram::new(name, help, bounds)?);
        self.metrics.push(Registered::Histogram(Arc::clone(&h)));
        Ok(h)
    }

    pub fn names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Render every registered metric, in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for m in &self.metrics {
            match m {
                Registered::Counter(c) => c.render(&mut out),
                Registered::Histogram(h) => h.render(&mut out),
            }
        }
        out
    }
}
