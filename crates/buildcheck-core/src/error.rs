//! Error types for buildcheck operations.
//!
//! Each variant names one failure kind a check can run into. Checks return
//! these through [`Result`]; the [`Check`](crate::Check) boundary turns any
//! error into a failing [`CheckResult`](crate::CheckResult), so nothing here
//! ever reaches the process level except [`Error::Config`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while verifying a project.
#[derive(Error, Debug)]
pub enum Error {
    /// A required file or directory is absent.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// I/O fault on a specific path.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text could not be decoded as the expected structure.
    #[error("parse error: {0}")]
    Parse(String),

    /// A subprocess could not be started or exited unsuccessfully.
    #[error("process failed ({}): {stderr}", describe_code(.code))]
    Process { code: Option<i32>, stderr: String },

    /// A subprocess ran past its allotted time.
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A round-tripped value differs from what was written.
    #[error("value mismatch for '{field}': expected {expected:?}, got {actual:?}")]
    ValueMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Harness configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a missing resource error.
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingResource(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "no exit code".to_string(),
    }
}

/// Result type alias using buildcheck's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_with_path_display() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "pkg/package.json",
        );
        let msg = err.to_string();
        assert!(msg.contains("pkg/package.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_process_display_includes_stderr() {
        let err = Error::Process {
            code: Some(2),
            stderr: "tsc: error TS2304".into(),
        };
        assert_eq!(
            err.to_string(),
            "process failed (exit code 2): tsc: error TS2304"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "timed out after 5s");
    }

    #[test]
    fn test_value_mismatch_display() {
        let err = Error::ValueMismatch {
            field: "apiKey".into(),
            expected: "a".into(),
            actual: "b".into(),
        };
        assert_eq!(
            err.to_string(),
            "value mismatch for 'apiKey': expected \"a\", got \"b\""
        );
    }
}
