//! Beacon server library entry.
//!
//! Wires config, request instrumentation, and the informational endpoints into
//! an axum router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod host;
pub mod obs;
pub mod ops;
pub mod router;
