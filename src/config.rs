//! Configuration management for exportenv
//!
//! Centralizes runtime options derived from the command line and provides validation.

use crate::{
    cli::Args,
    core::{DEFAULT_ENV_FILE, OutputMode, parser::is_valid_key},
    error::ExportEnvError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Env files in load order
    pub env_files: Vec<PathBuf>,
    /// Whether `${VAR}` references are expanded
    pub expand: bool,
    /// Whether later files replace variables from earlier ones
    pub override_existing: bool,
    /// Command-line variables, applied after all files
    pub vars: Vec<(String, String)>,
    /// Output format when no command is given
    pub mode: OutputMode,
    /// Command and arguments to run; empty to print instead
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            env_files: vec![PathBuf::from(DEFAULT_ENV_FILE)],
            expand: true,
            override_existing: false,
            vars: Vec::new(),
            mode: OutputMode::Export,
            command: Vec::new(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ExportEnvError> {
        let mode = if args.unset {
            OutputMode::Unset
        } else if args.preview {
            OutputMode::Preview
        } else {
            OutputMode::Export
        };

        let mut config = Self {
            debug: args.debug,
            expand: !args.no_expand,
            override_existing: args.override_existing,
            vars: args.vars.iter().map(|v| parse_var(v)).collect(),
            mode,
            command: args.command.clone(),
            ..Self::default()
        };

        if !args.env_files.is_empty() {
            config.env_files = args.env_files.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ExportEnvError> {
        for (key, _) in &self.vars {
            if !is_valid_key(key) {
                return Err(ExportEnvError::validation(format!(
                    "Invalid variable name in --var: {key:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Split `KEY=VALUE` at the first `=`; a bare `KEY` gets an empty value
pub fn parse_var(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((key, value)) => (key.to_string(), value.to_string()),
        None => (raw.to_string(), String::new()),
    }
}
