//! Custom error types for Snapshotter
//!
//! This module defines the error hierarchy for the snapshot engine using
//! thiserror. Every failure of an external command flows through here with
//! enough detail (command line, captured output, exit code) to diagnose it
//! without rerunning.

use thiserror::Error;

/// The main error type for Snapshotter operations
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// An external command exited non-zero
    #[error("Command `{command}` failed with exit code {exit_code}: {output}")]
    ExecutionFailed {
        command: String,
        output: String,
        exit_code: i32,
    },

    /// An external executable could not be located
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    /// The transfer ran out of space at the destination
    #[error("No space left on device while running `{command}`: {output}")]
    NoSpaceLeftOnDevice { command: String, output: String },

    /// Evicting another snapshot would go below the retention floor
    #[error(
        "No more snapshots to remove from {root}: {remaining} remaining, minimum is {min_snapshots}"
    )]
    NoMoreSnapshotsToRemove {
        root: String,
        remaining: usize,
        min_snapshots: usize,
    },

    /// Malformed arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SnapshotError {
    /// Check if this is the recoverable out-of-space failure
    pub fn is_no_space(&self) -> bool {
        matches!(self, Self::NoSpaceLeftOnDevice { .. })
    }

    /// Whether the orchestrator may retry after this failure
    ///
    /// Only an out-of-space transfer is retried, and only after evicting a
    /// snapshot.
    pub fn is_retryable(&self) -> bool {
        self.is_no_space()
    }

    /// Process exit code for the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExecutionFailed { .. } => 1,
            Self::InvalidArguments(_) => 2,
            Self::NoMoreSnapshotsToRemove { .. } => 3,
            Self::NoSpaceLeftOnDevice { .. } => 4,
            Self::Config(_) => 5,
            Self::Io(_) => 6,
            Self::CommandNotFound { .. } => 127,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for Snapshotter operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_display() {
        let err = SnapshotError::ExecutionFailed {
            command: "rsync --foobar".into(),
            output: "rsync: --foobar: unknown option".into(),
            exit_code: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("rsync --foobar"));
        assert!(msg.contains("unknown option"));
        assert!(msg.contains("exit code 1"));
    }

    #[test]
    fn test_no_more_snapshots_display() {
        let err = SnapshotError::NoMoreSnapshotsToRemove {
            root: "/media/backup".into(),
            remaining: 2,
            min_snapshots: 3,
        };
        assert_eq!(
            err.to_string(),
            "No more snapshots to remove from /media/backup: 2 remaining, minimum is 3"
        );
    }

    #[test]
    fn test_only_no_space_is_retryable() {
        let no_space = SnapshotError::NoSpaceLeftOnDevice {
            command: "rsync".into(),
            output: String::new(),
        };
        assert!(no_space.is_retryable());
        assert!(!SnapshotError::CommandNotFound {
            command: "rsync".into()
        }
        .is_retryable());
        assert!(!SnapshotError::Io("boom".into()).is_retryable());
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            SnapshotError::ExecutionFailed {
                command: String::new(),
                output: String::new(),
                exit_code: 1,
            },
            SnapshotError::CommandNotFound {
                command: String::new(),
            },
            SnapshotError::NoSpaceLeftOnDevice {
                command: String::new(),
                output: String::new(),
            },
            SnapshotError::NoMoreSnapshotsToRemove {
                root: String::new(),
                remaining: 0,
                min_snapshots: 3,
            },
            SnapshotError::InvalidArguments(String::new()),
            SnapshotError::Config(String::new()),
            SnapshotError::Io(String::new()),
        ];
        let codes: std::collections::HashSet<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SnapshotError = io_err.into();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
