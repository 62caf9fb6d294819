//! Process execution utilities
//!
//! Runs a child command with the loaded variables layered over the
//! inherited environment.

use crate::{
    core::EnvMap,
    error::{ExportEnvError, Result},
};
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command with `env_vars` added to the inherited environment.
    ///
    /// Variables in `env_vars` replace inherited ones of the same name.
    /// Stdin, stdout and stderr are passed through; the call blocks until
    /// the child exits.
    #[instrument(skip(self, env_vars))]
    pub fn run_command_with_env(
        &self,
        command: &str,
        args: &[String],
        env_vars: &EnvMap,
    ) -> Result<()> {
        let cmd_str = if args.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", command, args.join(" "))
        };

        if self.debug {
            debug!("Running command: {}", cmd_str);
            debug!("Injecting {} variables", env_vars.len());
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args)
            .envs(env_vars.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ExportEnvError::spawn(cmd_str.clone(), e))?;

        if !status.success() {
            return Err(ExportEnvError::process(cmd_str, status.code()));
        }

        debug!("Command completed successfully");
        Ok(())
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}
