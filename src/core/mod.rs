//! Core functionality for exportenv
//!
//! Contains the env file parser, variable expansion, multi-file merging
//! and output rendering.

pub mod env_map;
pub mod expand;
pub mod format;
pub mod merge;
pub mod parser;

pub use env_map::{EnvMap, EnvValue};
pub use expand::Expander;
pub use format::{OutputMode, render};
pub use merge::{DEFAULT_ENV_FILE, apply_overrides, load_env_files};
pub use parser::EnvFileParser;
