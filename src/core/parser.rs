//! `.env` file parsing
//!
//! Turns `KEY=VALUE` lines into an [`EnvMap`]. Handles single, double and
//! backtick quoting, values spanning several lines, inline comments and
//! `${VAR}` expansion inside double quotes. Lines that are not assignments
//! are skipped rather than reported.

use crate::{
    core::{env_map::EnvMap, expand::Expander},
    error::{ExportEnvError, Result},
};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, instrument, warn};

const QUOTES: [char; 3] = ['"', '\'', '`'];

/// A multiline quoted value that has not been closed yet
#[derive(Debug)]
struct ParseState {
    key: String,
    buffer: String,
    quote: char,
}

/// Result of decoding the value part of an assignment line
#[derive(Debug, PartialEq, Eq)]
enum Decoded {
    /// Value is complete; `quote` is the quote that wrapped it, if any
    Complete { value: String, quote: Option<char> },
    /// An opening quote without its closing partner on the same line
    Open { head: String, quote: char },
}

/// Parser for `.env` files
pub struct EnvFileParser {
    /// Regex for `[export] KEY = VALUE`
    re_assignment: Regex,
    expander: Expander,
    expand: bool,
}

impl EnvFileParser {
    /// Create a new parser; `expand` toggles `${VAR}` expansion in double quotes
    pub fn new(expand: bool) -> Result<Self> {
        Ok(Self {
            re_assignment: Regex::new(
                r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$",
            )?,
            expander: Expander::new()?,
            expand,
        })
    }

    /// Parse an env file from disk
    #[instrument(skip(self))]
    pub fn parse_file<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<EnvMap> {
        let path = path.as_ref();
        debug!("Parsing env file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| ExportEnvError::file_system("open", path.to_path_buf(), e))?;

        let lines = BufReader::new(file).lines();
        let vars = self.parse_lines(lines, path)?;

        debug!("Parsed {} variables from {}", vars.len(), path.display());
        Ok(vars)
    }

    /// Parse env content from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<EnvMap> {
        self.parse_lines(reader.lines(), Path::new("<reader>"))
    }

    /// Parse env content held in memory
    pub fn parse_str(&self, content: &str) -> EnvMap {
        let mut vars = EnvMap::new();
        let mut state = None;
        for line in content.lines() {
            self.feed_line(line, &mut state, &mut vars);
        }
        self.finish(state, &mut vars);
        vars
    }

    fn parse_lines<I>(&self, lines: I, path: &Path) -> Result<EnvMap>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let mut vars = EnvMap::new();
        let mut state = None;
        for line in lines {
            let line =
                line.map_err(|e| ExportEnvError::file_system("read", path.to_path_buf(), e))?;
            self.feed_line(&line, &mut state, &mut vars);
        }
        self.finish(state, &mut vars);
        Ok(vars)
    }

    fn feed_line(&self, line: &str, state: &mut Option<ParseState>, vars: &mut EnvMap) {
        if let Some(mut open) = state.take() {
            open.buffer.push('\n');
            match closing_segment(line, open.quote) {
                Some(last) => {
                    open.buffer.push_str(last);
                    self.assign(vars, open.key, &open.buffer, Some(open.quote));
                }
                None => {
                    open.buffer.push_str(line);
                    *state = Some(open);
                }
            }
            return;
        }

        if is_comment_or_empty(line) {
            return;
        }

        let Some(caps) = self.re_assignment.captures(line) else {
            debug!("Skipping line without assignment: {:?}", line);
            return;
        };
        let key = caps[1].to_string();
        let raw = strip_inline_comment(&caps[2]);

        match decode_value(&raw) {
            Decoded::Complete { value, quote } => self.assign(vars, key, &value, quote),
            Decoded::Open { head, quote } => {
                debug!("Multiline value started for {}", key);
                *state = Some(ParseState {
                    key,
                    buffer: head,
                    quote,
                });
            }
        }
    }

    fn finish(&self, state: Option<ParseState>, vars: &mut EnvMap) {
        if let Some(open) = state {
            warn!(
                "Unterminated {} quoted value for {}, keeping what was read",
                open.quote, open.key
            );
            self.assign(vars, open.key, &open.buffer, Some(open.quote));
        }
    }

    fn assign(&self, vars: &mut EnvMap, key: String, value: &str, quote: Option<char>) {
        match quote {
            None => vars.insert(key, value),
            Some('"') => {
                let value = unescape_quote(value, '"');
                let value = if self.expand {
                    self.expander.expand(&value, vars)
                } else {
                    value
                };
                vars.insert_settled(key, value.replace("\\n", "\n"));
            }
            Some(q) => vars.insert_settled(key, unescape_quote(value, q)),
        }
    }
}

/// Whether a line carries nothing to parse
pub fn is_comment_or_empty(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Whether `key` is a valid variable name (`[A-Za-z_][A-Za-z0-9_]*`)
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Drop a `#` comment that starts outside any quoted span, then trim.
///
/// Backslashes do not escape quotes here, so `"C:\dir\" # note` keeps
/// its closing quote.
pub fn strip_inline_comment(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut open: Option<char> = None;

    for ch in value.chars() {
        match open {
            Some(q) if ch == q => open = None,
            Some(_) => {}
            None if ch == '#' => break,
            None if QUOTES.contains(&ch) => open = Some(ch),
            None => {}
        }
        result.push(ch);
    }

    result.trim().to_string()
}

fn decode_value(raw: &str) -> Decoded {
    let Some(quote) = raw.chars().next().filter(|c| QUOTES.contains(c)) else {
        return Decoded::Complete {
            value: raw.to_string(),
            quote: None,
        };
    };

    // A trailing quote closes the value even after a backslash; only
    // interior `\q` sequences are unescaped later.
    let body = &raw[quote.len_utf8()..];
    if body.ends_with(quote) {
        Decoded::Complete {
            value: body[..body.len() - quote.len_utf8()].to_string(),
            quote: Some(quote),
        }
    } else {
        Decoded::Open {
            head: body.to_string(),
            quote,
        }
    }
}

/// Content of a continuation line if it closes the open value.
///
/// A line closes the value when its last non-blank character is the
/// quote, or when that quote is followed only by a `#` comment.
fn closing_segment(line: &str, quote: char) -> Option<&str> {
    let trimmed = line.trim_end();
    if let Some(content) = trimmed.strip_suffix(quote) {
        return Some(content);
    }

    let idx = trimmed.rfind(quote)?;
    let rest = trimmed[idx + quote.len_utf8()..].trim_start();
    rest.starts_with('#').then(|| &trimmed[..idx])
}

fn unescape_quote(value: &str, quote: char) -> String {
    value.replace(&format!("\\{quote}"), &quote.to_string())
}
