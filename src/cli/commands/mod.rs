//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod check;
pub mod serve;
pub mod validate;

use crate::config::{load_config, load_config_from, EnvSnapshot, ResolvedConfig};
use crate::domain::ConfigError;
use std::path::Path;

/// Resolve configuration from `path`, or the default location when `None`
fn resolve_config(path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    match path {
        Some(path) => load_config_from(path, &EnvSnapshot::from_process()),
        None => load_config(),
    }
}
