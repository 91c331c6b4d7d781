// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Signal acquisition errors.
//!
//! There is exactly one failure class in the detector: a signal could not be
//! read. Probes record it and move on; it never reaches the public API.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a platform signal could not be read.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("permission denied while reading {0}")]
    PermissionDenied(&'static str),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {command}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("platform error: {0}")]
    Platform(String),
}

impl SignalError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn command(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Command {
            command: command.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_signal() {
        assert_eq!(
            SignalError::Unavailable("telephony").to_string(),
            "telephony is unavailable"
        );
        assert_eq!(
            SignalError::PermissionDenied("line number").to_string(),
            "permission denied while reading line number"
        );
    }

    #[test]
    fn test_io_keeps_source() {
        use std::error::Error as _;

        let err = SignalError::io(
            "/proc/cpuinfo",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.to_string(), "failed to read /proc/cpuinfo");
        assert!(err.source().is_some());
    }
}
