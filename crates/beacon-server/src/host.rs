//! Ambient host/build metadata for the informational endpoints.
//!
//! Version strings are captured by `build.rs`; anything unavailable is
//! reported as `"unknown"` rather than failing the request.

use chrono::{SecondsFormat, Utc};
use sysinfo::System;

pub const UNKNOWN: &str = "unknown";

fn or_unknown(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Host name of the machine/container; never empty.
pub fn hostname() -> String {
    or_unknown(System::host_name().as_deref())
}

/// rustc version used to build this binary, e.g. `1.80.0`.
pub fn runtime_version() -> String {
    or_unknown(option_env!("BEACON_RUSTC_VERSION"))
}

/// Version of the HTTP framework linked into the binary.
pub fn library_version() -> String {
    or_unknown(option_env!("BEACON_AXUM_VERSION"))
}

/// Current UTC time as RFC 3339 / ISO-8601 with millisecond precision.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_values_become_unknown() {
        assert_eq!(or_unknown(None), UNKNOWN);
        assert_eq!(or_unknown(Some("  ")), UNKNOWN);
        assert_eq!(or_unknown(Some("0.7.9")), "0.7.9");
    }

    #[test]
    fn metadata_is_never_empty() {
        assert!(!hostname().is_empty());
        assert!(!runtime_version().is_empty());
        assert!(!library_version().is_empty());
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = now_iso8601();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "{ts}");
    }
}
