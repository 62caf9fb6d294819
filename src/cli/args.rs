//! Command-line argument parsing and validation

use clap::Parser;
use std::path::PathBuf;

/// exportenv - Load .env files into your shell or into a command
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "exportenv")]
pub struct Args {
    /// Paths to the .env files, processed in the order given [default: .env]
    #[arg(short = 'f', long = "env-file", value_name = "PATH")]
    pub env_files: Vec<PathBuf>,

    /// Disable variable expansion
    #[arg(long)]
    pub no_expand: bool,

    /// Let later files override variables already set by earlier ones
    #[arg(short = 'o', long = "override")]
    pub override_existing: bool,

    /// Set a variable from the command line, taking precedence over files
    #[arg(short = 'v', long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Print KEY=VALUE lines instead of export statements
    #[arg(short = 'p', long, conflicts_with = "unset")]
    pub preview: bool,

    /// Print unset statements instead of export statements
    #[arg(short = 'u', long)]
    pub unset: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Write log events to stderr as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Command to execute with the environment variables
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
