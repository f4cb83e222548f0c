//! Shared error type across Beacon crates.

use thiserror::Error;

/// Stable error codes (used in logs and process exit diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or unsupported configuration.
    BadConfig,
    /// Filesystem / socket failure.
    Io,
    /// Invalid metric definition.
    BadMetric,
}

impl ErrorCode {
    /// String representation used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Io => "IO",
            ErrorCode::BadMetric => "BAD_METRIC",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad metric: {0}")]
    BadMetric(String),
}

impl BeaconError {
    /// Map error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            BeaconError::BadConfig(_) => ErrorCode::BadConfig,
            BeaconError::Io(_) => ErrorCode::Io,
            BeaconError::BadMetric(_) => ErrorCode::BadMetric,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_map_to_io_code() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        let err = open().unwrap_err();
        assert_eq!(err.code(), ErrorCode::Io);
        assert_eq!(err.code().as_str(), "IO");
    }

    #[test]
    fn config_and_metric_errors_have_distinct_codes() {
        let cfg = BeaconError::BadConfig("x".into());
        let metric = BeaconError::BadMetric("y".into());
        assert_eq!(cfg.code().as_str(), "BAD_CONFIG");
        assert_eq!(metric.code().as_str(), "BAD_METRIC");
        assert_eq!(metric.to_string(), "bad metric: y");
    }
}
