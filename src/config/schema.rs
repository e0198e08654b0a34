//! Configuration schema types
//!
//! Two layers live here. The `*Section` structs mirror the TOML file exactly and
//! default every absent key to its zero value, so the resolver can tell "not
//! configured" apart from "configured". [`ResolvedConfig`] is the validated,
//! read-only result handed to the rest of the process.

use crate::adapters::postgresql::PgConnectParams;
use crate::config::{secret_string, secret_string_opt, SecretString};
use crate::domain::RequiredField;
use serde::Deserialize;

/// The configuration file as parsed from disk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Object store (MinIO) connection parameters
    pub minio: MinioSection,

    /// PostgreSQL connection parameters
    pub pg: PgSection,

    /// Data generator service settings
    pub datagen: DataGenSection,

    /// Settings for our own HTTPS listener
    pub web: WebSection,
}

/// `[minio]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MinioSection {
    /// Endpoint as `host:port`
    pub server: String,

    /// Access key
    pub access_key: String,

    /// Secret key
    pub secret: String,

    /// Connect over HTTPS
    pub https: bool,
}

/// `[pg]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PgSection {
    /// Database host
    pub server: String,

    /// Database port, 0 when unset
    pub port: u16,

    /// Login role
    pub username: String,

    /// Password, may be left empty and supplied through `.pgpass`
    pub password: String,

    /// Database name
    pub database: String,
}

/// `[datagen]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataGenSection {
    pub server: String,
    pub https: bool,
    pub certificate: String,
    pub certificate_key: String,
}

/// `[web]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebSection {
    /// Listen address, e.g. `0.0.0.0:8443`
    pub server: String,
    pub certificate: String,
    pub certificate_key: String,
}

impl FileConfig {
    /// Returns every required field that still holds its zero value
    ///
    /// Fields are checked in a fixed order and all of them are reported. The
    /// database password is intentionally not checked.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        let checks = [
            (RequiredField::MinioServer, self.minio.server.is_empty()),
            (RequiredField::MinioAccessKey, self.minio.access_key.is_empty()),
            (RequiredField::MinioSecret, self.minio.secret.is_empty()),
            (RequiredField::PgServer, self.pg.server.is_empty()),
            (RequiredField::PgPort, self.pg.port == 0),
            (RequiredField::PgUsername, self.pg.username.is_empty()),
            (RequiredField::PgDatabase, self.pg.database.is_empty()),
        ];

        checks
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect()
    }
}

/// Object store connection settings
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// Endpoint as `host:port`
    pub endpoint: String,

    /// Access key
    pub access_key: String,

    /// Secret key
    /// Stored securely in memory and automatically zeroized on drop
    pub secret_key: SecretString,

    /// Connect over HTTPS
    pub use_tls: bool,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,

    /// `None` when neither the file nor `PG_PASS` supplied one
    pub password: Option<SecretString>,

    pub database_name: String,
}

/// Data generator service settings
#[derive(Debug, Clone, Default)]
pub struct DataGenConfig {
    pub endpoint: String,
    pub use_tls: bool,
    pub cert_path: String,
    pub cert_key_path: String,
}

/// HTTPS listener settings
///
/// Not validated during resolution; the listener checks these before binding.
#[derive(Debug, Clone, Default)]
pub struct WebServerConfig {
    pub listen_address: String,
    pub cert_path: String,
    pub cert_key_path: String,
}

/// Fully resolved server configuration
///
/// Built once at startup by [`crate::config::resolve`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    object_store: ObjectStoreConfig,
    database: DatabaseConfig,
    datagen: DataGenConfig,
    web: WebServerConfig,
}

impl ResolvedConfig {
    /// Builds the resolved value from a file config that passed validation
    pub(crate) fn from_validated(file: FileConfig) -> Self {
        let FileConfig {
            minio,
            pg,
            datagen,
            web,
        } = file;

        let password = secret_string_opt(Some(pg.password).filter(|p| !p.is_empty()));

        Self {
            object_store: ObjectStoreConfig {
                endpoint: minio.server,
                access_key: minio.access_key,
                secret_key: secret_string(minio.secret),
                use_tls: minio.https,
            },
            database: DatabaseConfig {
                host: pg.server,
                port: pg.port,
                username: pg.username,
                password,
                database_name: pg.database,
            },
            datagen: DataGenConfig {
                endpoint: datagen.server,
                use_tls: datagen.https,
                cert_path: datagen.certificate,
                cert_key_path: datagen.certificate_key,
            },
            web: WebServerConfig {
                listen_address: web.server,
                cert_path: web.certificate,
                cert_key_path: web.certificate_key,
            },
        }
    }

    /// Object store settings
    pub fn object_store(&self) -> &ObjectStoreConfig {
        &self.object_store
    }

    /// PostgreSQL settings
    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Data generator settings
    pub fn datagen(&self) -> &DataGenConfig {
        &self.datagen
    }

    /// HTTPS listener settings
    pub fn web(&self) -> &WebServerConfig {
        &self.web
    }

    /// Connection parameters for the PostgreSQL connector
    ///
    /// Transport security is left unset.
    pub fn pg_connect_params(&self) -> PgConnectParams {
        PgConnectParams {
            host: self.database.host.clone(),
            port: self.database.port,
            user: self.database.username.clone(),
            password: self.database.password.clone(),
            database: self.database.database_name.clone(),
            tls: None,
        }
    }
}
