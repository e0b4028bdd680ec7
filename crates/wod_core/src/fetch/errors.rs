//! Error types for scene fetching.
//!
//! `FetchError` is per-scene and contained at the task boundary; one
//! scene's failure never touches its siblings. `RunError` is fatal and
//! ends the run before any task is dispatched.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::ResolveError;

/// Error fetching a single scene.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The copy tool ran and exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The copy tool could not be launched at all.
    #[error("Failed to launch {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Local filesystem error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a spawn failed error.
    pub fn spawn_failed(tool: impl Into<String>, source: io::Error) -> Self {
        Self::SpawnFailed {
            tool: tool.into(),
            source,
        }
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for per-scene fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Fatal error ending a whole run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to create target dir {path}: {source}")]
    TargetDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_displays_context() {
        let err = FetchError::command_failed("gsutil", 1, "No URLs matched");
        let msg = err.to_string();
        assert!(msg.contains("gsutil"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("No URLs matched"));
    }

    #[test]
    fn run_error_wraps_resolve() {
        let err = RunError::from(ResolveError::IndexOutOfRange { index: 9, len: 3 });
        assert!(err.to_string().contains("out of range"));
    }
}
