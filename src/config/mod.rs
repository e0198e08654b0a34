//! Configuration management for DBHub.
//!
//! The server reads `~/.dbhub/config.toml`, lets environment variables override
//! individual fields, and refuses to start unless every required field ends up
//! set.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dbhub::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//!
//! println!("Minio server: {}", config.object_store().endpoint);
//! println!("PostgreSQL server: {}:{}", config.database().host, config.database().port);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - `[minio]` - object store endpoint and credentials ([`ObjectStoreConfig`])
//! - `[pg]` - PostgreSQL connection ([`DatabaseConfig`])
//! - `[datagen]` - data generator service ([`DataGenConfig`])
//! - `[web]` - our own HTTPS listener ([`WebServerConfig`])
//!
//! # Example Configuration
//!
//! ```toml
//! [minio]
//! server = "localhost:9000"
//! access_key = "minio"
//! secret = "minio123"
//! https = false
//!
//! [pg]
//! server = "localhost"
//! port = 5432
//! username = "dbhub"
//! password = "changeme"
//! database = "dbhub"
//!
//! [datagen]
//! server = "localhost:9443"
//! https = true
//! certificate = "/etc/dbhub/datagen.crt"
//! certificate_key = "/etc/dbhub/datagen.key"
//!
//! [web]
//! server = "0.0.0.0:8443"
//! certificate = "/etc/dbhub/web.crt"
//! certificate_key = "/etc/dbhub/web.key"
//! ```
//!
//! # Environment Variables
//!
//! Non-empty values of these variables replace the file value:
//!
//! `MINIO_SERVER`, `MINIO_ACCESS_KEY`, `MINIO_SECRET`, `MINIO_HTTPS`,
//! `PG_SERVER`, `PG_PORT`, `PG_USER`, `PG_PASS`, `PG_DBNAME`.
//!
//! The PostgreSQL password is optional here; it can also come from `~/.pgpass`
//! at connection time.

pub mod env;
pub mod loader;
pub mod overrides;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use env::EnvSnapshot;
pub use loader::{default_config_path, load_config, load_config_from, resolve};
pub use overrides::ENV_OVERRIDES;
pub use schema::{
    DataGenConfig, DatabaseConfig, FileConfig, ObjectStoreConfig, ResolvedConfig, WebServerConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
