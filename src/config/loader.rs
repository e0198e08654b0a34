//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Resolution is a single linear pass:
//! 1. Parse the TOML file contents
//! 2. Apply environment overrides from an [`EnvSnapshot`]
//! 3. Check that every required field is set, collecting all that are not
//! 4. Build the immutable [`ResolvedConfig`]

use super::env::EnvSnapshot;
use super::overrides::apply_env_overrides;
use super::schema::{FileConfig, ResolvedConfig};
use crate::domain::{ConfigError, ParseCause};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the user's home that holds the configuration
pub const CONFIG_DIR: &str = ".dbhub";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Resolves configuration from file contents and an environment snapshot
///
/// This is a pure function: it performs no I/O and reads nothing from the
/// process environment.
///
/// # Errors
///
/// - [`ConfigError::ConfigParse`] if `contents` is not valid TOML for the schema
/// - [`ConfigError::OverrideParse`] if a flag or port override does not convert
/// - [`ConfigError::IncompleteConfig`] listing every required field left empty
///
/// # Examples
///
/// ```
/// use dbhub::config::{resolve, EnvSnapshot};
///
/// let contents = r#"
/// [minio]
/// server = "localhost:9000"
/// access_key = "AK"
/// secret = "SECRET"
///
/// [pg]
/// server = "localhost"
/// username = "u"
/// database = "d"
/// "#;
///
/// let env = EnvSnapshot::from_pairs([("PG_PORT", "5432")]);
/// let config = resolve(contents, &env).unwrap();
/// assert_eq!(config.database().port, 5432);
/// ```
pub fn resolve(contents: &str, env: &EnvSnapshot) -> Result<ResolvedConfig, ConfigError> {
    let mut config: FileConfig = toml::from_str(contents).map_err(ParseCause::from)?;

    apply_env_overrides(&mut config, env)?;

    let missing = config.missing_required();
    if !missing.is_empty() {
        return Err(ConfigError::IncompleteConfig { missing });
    }

    Ok(ResolvedConfig::from_validated(config))
}

/// Returns `~/.dbhub/config.toml` for the invoking user
///
/// # Errors
///
/// Returns [`ConfigError::HomeDirUnavailable`] if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Loads configuration from the default path using the process environment
///
/// # Examples
///
/// ```no_run
/// use dbhub::config::load_config;
///
/// let config = load_config().expect("Failed to load config");
/// println!("Minio server: {}", config.object_store().endpoint);
/// ```
pub fn load_config() -> Result<ResolvedConfig, ConfigError> {
    let path = default_config_path()?;
    load_config_from(&path, &EnvSnapshot::from_process())
}

/// Loads configuration from `path`, applying overrides from `env`
///
/// # Errors
///
/// Returns [`ConfigError::ConfigParse`] if the file cannot be read, plus every
/// error [`resolve`] can return.
pub fn load_config_from(
    path: impl AsRef<Path>,
    env: &EnvSnapshot,
) -> Result<ResolvedConfig, ConfigError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| ParseCause::Read {
        path: path.to_path_buf(),
        source,
    })?;

    warn_if_exposed(path);

    let config = resolve(&contents, env)?;
    tracing::info!(path = %path.display(), "Configuration resolved");
    Ok(config)
}

/// Logs a warning when the config file is readable by group or others
#[cfg(unix)]
fn warn_if_exposed(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            tracing::warn!(
                path = %path.display(),
                mode = format!("{:o}", mode & 0o777),
                "Configuration file holds credentials but is accessible by other users"
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_exposed(_path: &Path) {}
