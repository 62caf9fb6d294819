//! Rendering of the final variable map

use crate::core::env_map::EnvMap;
use serde::{Deserialize, Serialize};

/// What to print for each variable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// `export KEY="VALUE"`
    #[default]
    Export,
    /// `unset KEY`
    Unset,
    /// `KEY=VALUE`, unquoted
    Preview,
}

/// Render one line per variable, sorted by key, each newline-terminated
pub fn render(vars: &EnvMap, mode: OutputMode) -> String {
    let mut out = String::new();
    for (key, value) in vars.iter() {
        out.push_str(&format_line(key, value, mode));
        out.push('\n');
    }
    out
}

/// Format a single variable without a trailing newline.
///
/// Export mode escapes only `"`. Backslashes, `$` and backticks pass through,
/// so a value ending in `\` yields a line the shell cannot `eval`.
pub fn format_line(key: &str, value: &str, mode: OutputMode) -> String {
    match mode {
        // Newlines stay inside the quotes; the shell reads them as part of the value.
        OutputMode::Export => format!("export {}=\"{}\"", key, value.replace('"', "\\\"")),
        OutputMode::Unset => format!("unset {key}"),
        OutputMode::Preview => format!("{key}={value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnvMap {
        [("B", "two words"), ("A", "say \"hi\""), ("C", "l1\nl2")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_render_export() {
        assert_eq!(
            render(&sample(), OutputMode::Export),
            "export A=\"say \\\"hi\\\"\"\nexport B=\"two words\"\nexport C=\"l1\nl2\"\n"
        );
    }

    #[test]
    fn test_render_unset() {
        assert_eq!(
            render(&sample(), OutputMode::Unset),
            "unset A\nunset B\nunset C\n"
        );
    }

    #[test]
    fn test_render_preview() {
        assert_eq!(
            render(&sample(), OutputMode::Preview),
            "A=say \"hi\"\nB=two words\nC=l1\nl2\n"
        );
    }

    #[test]
    fn test_export_escapes_only_double_quotes() {
        assert_eq!(
            format_line("A", "foo\\", OutputMode::Export),
            "export A=\"foo\\\""
        );
        assert_eq!(
            format_line("B", "$HOME `x`", OutputMode::Export),
            "export B=\"$HOME `x`\""
        );
    }

    #[test]
    fn test_empty_value_and_empty_map() {
        assert_eq!(format_line("E", "", OutputMode::Export), "export E=\"\"");
        assert_eq!(render(&EnvMap::new(), OutputMode::Export), "");
    }
}
