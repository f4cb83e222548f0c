//! Beacon core: transport-agnostic metric primitives and error types.
//!
//! This crate holds the metrics registry (counter vectors and histograms) and
//! the Prometheus text exposition renderer. It carries no HTTP or runtime
//! dependencies so the registry can be exercised directly in tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are denied via clippy lints
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`), so
//! they are enforced under `cargo clippy`, not by a plain `cargo build`.
//! All fallible paths must surface as `BeaconError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{BeaconError, Result};
