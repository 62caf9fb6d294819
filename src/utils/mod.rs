//! Utility modules for common functionality
//!
//! Provides child process execution.

pub mod process;

pub use process::ProcessRunner;
