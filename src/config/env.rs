//! Environment snapshot used for configuration overrides.
//!
//! The resolver never reads the process environment itself. [`EnvSnapshot::from_process`]
//! captures the override variables once at startup; tests build a snapshot from
//! explicit pairs instead of mutating the real environment.

use super::overrides::ENV_OVERRIDES;
use std::collections::HashMap;

/// Immutable capture of environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture every override variable from the real process environment
    ///
    /// Variables that are unset or not valid unicode are left out.
    pub fn from_process() -> Self {
        let vars = ENV_OVERRIDES
            .iter()
            .filter_map(|o| {
                std::env::var(o.variable)
                    .ok()
                    .map(|value| (o.variable.to_string(), value))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit key-value pairs
    pub fn from_pairs(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// An empty snapshot, as if no variables were set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a variable, treating an empty value as unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
