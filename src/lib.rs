//! # exportenv
//!
//! Reads `.env` files and turns them into something a shell can use.
//! The merged variables are printed as `export` statements for `eval`,
//! as `unset` statements, as a plain `KEY=VALUE` preview, or injected
//! into the environment of a child command.
//!
//! ## Features
//!
//! - Single, double and backtick quoting with multiline values
//! - Inline `#` comments outside quotes
//! - `${VAR}` expansion against previously defined variables
//! - Ordered multi-file loading with optional cross-file override
//! - Command-line variables with top precedence
//!
//! ## Example
//!
//! ```no_run
//! use exportenv::core::{EnvFileParser, OutputMode, render};
//!
//! let parser = EnvFileParser::new(true)?;
//! let vars = parser.parse_file(".env")?;
//! print!("{}", render(&vars, OutputMode::Export));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging on stderr so stdout stays clean for `eval`.
///
/// With `json` set, each event is written as one JSON object per line.
pub fn setup_logging(debug: bool, json: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer.compact()).try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
