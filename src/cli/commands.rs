//! Command implementations for the CLI

use crate::{
    config::Config,
    core::{Expander, apply_overrides, load_env_files, render},
    utils::ProcessRunner,
};
use anyhow::Context;
use std::io::Write;
use tracing::{debug, error, instrument};

/// Load, merge and expand variables, then print them or run the command
#[instrument(skip(config))]
pub fn execute(config: &Config) -> anyhow::Result<()> {
    let mut vars = load_env_files(&config.env_files, config.override_existing, config.expand)
        .context("Failed to load env files")?;

    apply_overrides(&mut vars, &config.vars);

    if config.expand {
        Expander::new()?.expand_all(&mut vars);
    }

    let Some((program, args)) = config.command.split_first() else {
        debug!("Rendering {} variables as {:?}", vars.len(), config.mode);
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(render(&vars, config.mode).as_bytes())
            .context("Failed to write output")?;
        return stdout.flush().context("Failed to write output");
    };

    let runner = ProcessRunner::new(config.debug);
    if let Err(e) = runner.run_command_with_env(program, args, &vars) {
        error!("Error executing command: {}", e);
    }

    Ok(())
}
