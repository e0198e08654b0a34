//! Domain error types
//!
//! This module defines the error hierarchy for DBHub. Configuration resolution
//! has its own structured [`ConfigError`] so callers and tests can inspect the
//! failure kind programmatically; everything else surfaces through [`DbhubError`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main DBHub error type
///
/// This is the primary error type used by the startup path and the CLI commands.
#[derive(Debug, Error)]
pub enum DbhubError {
    /// Configuration resolution failed
    #[error("Configuration problem\n\n{0}")]
    Configuration(#[from] ConfigError),

    /// PostgreSQL connection or query errors
    #[error("Database error: {0}")]
    Database(String),

    /// Object store (MinIO) client errors
    #[error("Object store error: {0}")]
    ObjectStore(String),

    /// HTTPS listener errors
    #[error("Server error: {0}")]
    Server(String),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors produced while resolving the server configuration
///
/// All variants are terminal: the resolver never retries, and the process is
/// expected to exit after reporting one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The invoking user's home directory could not be determined
    #[error("User home directory couldn't be determined")]
    HomeDirUnavailable,

    /// The configuration file is missing, unreadable or not valid TOML
    #[error("Config file couldn't be parsed: {0}")]
    ConfigParse(#[from] ParseCause),

    /// An environment override failed type conversion
    #[error("Failed to parse {variable}: {source}")]
    OverrideParse {
        /// Name of the offending environment variable
        variable: &'static str,
        /// Why the value was rejected
        #[source]
        source: OverrideCause,
    },

    /// One or more required fields are empty after file and overrides
    #[error("{}", MissingList(.missing))]
    IncompleteConfig {
        /// Every missing field, in the order they were checked
        missing: Vec<RequiredField>,
    },
}

impl ConfigError {
    /// Returns the missing fields when this is an [`ConfigError::IncompleteConfig`]
    pub fn missing_fields(&self) -> Option<&[RequiredField]> {
        match self {
            ConfigError::IncompleteConfig { missing } => Some(missing),
            _ => None,
        }
    }
}

/// Underlying cause of a [`ConfigError::ConfigParse`]
#[derive(Debug, Error)]
pub enum ParseCause {
    /// The file could not be read
    #[error("{}: {source}", .path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// I/O failure
        source: std::io::Error,
    },

    /// The contents are not valid TOML for the expected structure
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
}

/// Underlying cause of a [`ConfigError::OverrideParse`]
#[derive(Debug, Error)]
pub enum OverrideCause {
    /// The value is not a recognised boolean literal
    #[error("invalid boolean literal {0:?}")]
    InvalidBool(String),

    /// The value is not a base-10 integer in the field's range
    #[error("invalid port number {value:?}: {source}")]
    InvalidInteger {
        /// The rejected value
        value: String,
        /// Integer parse failure
        source: std::num::ParseIntError,
    },
}

/// Configuration fields that must be non-empty after resolution
///
/// Variant order is the order the resolver checks them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// `minio.server`
    MinioServer,
    /// `minio.access_key`
    MinioAccessKey,
    /// `minio.secret`
    MinioSecret,
    /// `pg.server`
    PgServer,
    /// `pg.port`
    PgPort,
    /// `pg.username`
    PgUsername,
    /// `pg.database`
    PgDatabase,
}

impl RequiredField {
    /// The dotted key of this field in the configuration file
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::MinioServer => "minio.server",
            RequiredField::MinioAccessKey => "minio.access_key",
            RequiredField::MinioSecret => "minio.secret",
            RequiredField::PgServer => "pg.server",
            RequiredField::PgPort => "pg.port",
            RequiredField::PgUsername => "pg.username",
            RequiredField::PgDatabase => "pg.database",
        }
    }

    /// Human readable description used in error output
    pub fn description(self) -> &'static str {
        match self {
            RequiredField::MinioServer => "Minio server:port string",
            RequiredField::MinioAccessKey => "Minio access key string",
            RequiredField::MinioSecret => "Minio secret string",
            RequiredField::PgServer => "PostgreSQL server string",
            RequiredField::PgPort => "PostgreSQL port number",
            RequiredField::PgUsername => "PostgreSQL username string",
            RequiredField::PgDatabase => "PostgreSQL database string",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.key())
    }
}

struct MissingList<'a>(&'a [RequiredField]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing or incomplete value(s):")?;
        for field in self.0 {
            write!(f, "\n \t→ {field}")?;
        }
        Ok(())
    }
}

impl From<std::io::Error> for DbhubError {
    fn from(err: std::io::Error) -> Self {
        DbhubError::Io(err.to_string())
    }
}

impl From<tokio_postgres::Error> for DbhubError {
    fn from(err: tokio_postgres::Error) -> Self {
        DbhubError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_config_lists_every_field() {
        let err = ConfigError::IncompleteConfig {
            missing: vec![RequiredField::MinioSecret, RequiredField::PgPort],
        };
        let msg = err.to_string();

        assert!(msg.starts_with("Missing or incomplete value(s):"));
        assert!(msg.contains("Minio secret string (minio.secret)"));
        assert!(msg.contains("PostgreSQL port number (pg.port)"));
        assert!(msg.find("minio.secret").unwrap() < msg.find("pg.port").unwrap());
    }

    #[test]
    fn test_missing_fields_accessor() {
        let err = ConfigError::IncompleteConfig {
            missing: vec![RequiredField::PgServer],
        };
        assert_eq!(err.missing_fields(), Some(&[RequiredField::PgServer][..]));
        assert!(ConfigError::HomeDirUnavailable.missing_fields().is_none());
    }

    #[test]
    fn test_override_parse_names_variable() {
        let err = ConfigError::OverrideParse {
            variable: "MINIO_HTTPS",
            source: OverrideCause::InvalidBool("notabool".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse MINIO_HTTPS: invalid boolean literal \"notabool\""
        );
        assert!(err.missing_fields().is_none());
    }

    #[test]
    fn test_config_parse_wraps_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ConfigError = ParseCause::from(toml_err).into();
        assert!(matches!(err, ConfigError::ConfigParse(ParseCause::Toml(_))));
        assert!(err.to_string().starts_with("Config file couldn't be parsed"));
    }

    #[test]
    fn test_config_error_converts_into_dbhub_error() {
        let err: DbhubError = ConfigError::HomeDirUnavailable.into();
        assert!(matches!(
            err,
            DbhubError::Configuration(ConfigError::HomeDirUnavailable)
        ));
        assert!(err.to_string().contains("home directory"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: DbhubError = io_err.into();
        assert!(matches!(err, DbhubError::Io(_)));
    }

    #[test]
    fn test_dbhub_error_implements_std_error() {
        let err = DbhubError::Server("bind failed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
