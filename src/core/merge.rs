//! Multi-file loading and precedence rules

use crate::{
    core::{env_map::EnvMap, parser::EnvFileParser},
    error::Result,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// File read when no env file is given
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Load and merge env files in order.
///
/// With `override_existing` unset the first file to define a key wins;
/// otherwise later files replace earlier definitions. An empty list loads
/// [`DEFAULT_ENV_FILE`]. The first unreadable file aborts the whole load.
#[instrument(skip(files), fields(count = files.len()))]
pub fn load_env_files(files: &[PathBuf], override_existing: bool, expand: bool) -> Result<EnvMap> {
    let default_files = [PathBuf::from(DEFAULT_ENV_FILE)];
    let files = if files.is_empty() {
        &default_files[..]
    } else {
        files
    };

    let parser = EnvFileParser::new(expand)?;
    let mut merged = EnvMap::new();

    for file in files {
        let vars = parser.parse_file(file.as_path())?;
        merge_into(&mut merged, vars, override_existing);
        debug!("Merged {}: {} variables total", file.display(), merged.len());
    }

    info!("Loaded {} variables from {} file(s)", merged.len(), files.len());
    Ok(merged)
}

/// Fold `incoming` into `merged` under the override policy
pub fn merge_into(merged: &mut EnvMap, incoming: EnvMap, override_existing: bool) {
    for (key, value) in incoming {
        if override_existing || !merged.contains_key(&key) {
            merged.insert_value(key, value.value, value.settled);
        } else {
            debug!("Keeping earlier definition of {}", key);
        }
    }
}

/// Apply command-line variables; they always win over file values
pub fn apply_overrides(merged: &mut EnvMap, vars: &[(String, String)]) {
    for (key, value) in vars {
        merged.insert(key.as_str(), value.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_env(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_first_definition_wins_without_override() {
        let dir = TempDir::new().unwrap();
        let f1 = write_env(&dir, "one.env", "A=1\nB=only-one\n");
        let f2 = write_env(&dir, "two.env", "A=2\nC=only-two\n");

        let vars = load_env_files(&[f1, f2], false, true).unwrap();

        assert_eq!(vars.get("A"), Some("1"));
        assert_eq!(vars.get("B"), Some("only-one"));
        assert_eq!(vars.get("C"), Some("only-two"));
    }

    #[test]
    fn test_later_file_wins_with_override() {
        let dir = TempDir::new().unwrap();
        let f1 = write_env(&dir, "one.env", "A=1\n");
        let f2 = write_env(&dir, "two.env", "A=2\n");

        let vars = load_env_files(&[f1, f2], true, true).unwrap();

        assert_eq!(vars.get("A"), Some("2"));
    }

    #[test]
    fn test_missing_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        let f1 = write_env(&dir, "one.env", "A=1\n");
        let missing = dir.path().join("missing.env");

        assert!(load_env_files(&[f1, missing], false, true).is_err());
    }

    #[test]
    fn test_command_line_vars_take_precedence() {
        for override_existing in [false, true] {
            let mut merged: EnvMap = [("A", "1"), ("B", "2")].into_iter().collect();
            merge_into(
                &mut merged,
                [("A", "file")].into_iter().collect(),
                override_existing,
            );

            apply_overrides(&mut merged, &[("A".to_string(), "3".to_string())]);

            assert_eq!(merged.get("A"), Some("3"));
            assert_eq!(merged.get("B"), Some("2"));
        }
    }

    #[test]
    fn test_merge_keeps_settled_state() {
        let mut merged = EnvMap::new();
        let mut incoming = EnvMap::new();
        incoming.insert_settled("LIT", "${X}");

        merge_into(&mut merged, incoming, false);

        assert!(merged.is_settled("LIT"));
    }
}
