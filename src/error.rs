//! Error types for exportenv
//!
//! Provides structured error handling with context and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for exportenv
#[derive(Error, Debug)]
pub enum ExportEnvError {
    /// An env file could not be opened or read
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child command could not be started
    #[error("Process error: failed to start {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child command exited unsuccessfully
    #[error("Process error: {command} failed with exit code {exit_code:?}")]
    Process {
        command: String,
        exit_code: Option<i32>,
    },

    /// Invalid command-line input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl ExportEnvError {
    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a new process error
    pub fn process(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ExportEnvError>;
