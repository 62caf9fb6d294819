//! `${VAR}` expansion against already known variables

use crate::{core::env_map::EnvMap, error::Result};
use regex::{Captures, Regex};
use tracing::{debug, instrument};

/// Resolves `${NAME}` references
pub struct Expander {
    /// Regex for a braced variable reference
    re_reference: Regex,
}

impl Expander {
    /// Create a new expander
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_reference: Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?,
        })
    }

    /// Replace every reference in `value` with its current value in `vars`.
    ///
    /// Undefined names resolve to the empty string. Substituted text is not
    /// scanned again, so a value containing `${X}` is inserted verbatim.
    pub fn expand(&self, value: &str, vars: &EnvMap) -> String {
        self.re_reference
            .replace_all(value, |caps: &Captures| {
                let name = &caps[1];
                match vars.get(name) {
                    Some(v) => v.to_string(),
                    None => {
                        debug!("Undefined variable in expansion: {}", name);
                        String::new()
                    }
                }
            })
            .into_owned()
    }

    /// Expand every unsettled value in place, visiting keys in ascending order
    #[instrument(skip_all, fields(vars = vars.len()))]
    pub fn expand_all(&self, vars: &mut EnvMap) {
        let keys: Vec<String> = vars
            .keys()
            .filter(|k| !vars.is_settled(k))
            .map(str::to_string)
            .collect();

        for key in keys {
            let Some(value) = vars.get(&key) else {
                continue;
            };
            if !self.re_reference.is_match(value) {
                continue;
            }
            let expanded = self.expand(value, vars);
            debug!("Expanded {}", key);
            vars.insert(key, expanded);
        }
    }
}
