// DBHub - Web server bootstrap
// Copyright (c) 2025 DBHub Contributors
// Licensed under the MIT License

//! # DBHub server
//!
//! Startup for the DBHub web server: resolve configuration, connect to the
//! MinIO object store and PostgreSQL, then serve HTTPS.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration file, environment overrides and validation
//! - [`adapters`] - Object store and PostgreSQL clients
//! - [`server`] - HTTPS listener
//! - [`cli`] - Command-line interface
//! - [`domain`] - Error types
//! - [`logging`] - Structured logging
//!
//! ## Configuration Resolution
//!
//! Resolution is a pure function of the file contents and an environment
//! snapshot, so it can be exercised without touching the real environment:
//!
//! ```rust
//! use dbhub::config::{resolve, EnvSnapshot};
//! use dbhub::domain::RequiredField;
//!
//! let env = EnvSnapshot::from_pairs([("PG_SERVER", "db.internal")]);
//! let err = resolve("[pg]\nport = 5432\n", &env).unwrap_err();
//!
//! // Every missing field is reported at once
//! assert_eq!(
//!     err.missing_fields().unwrap(),
//!     &[
//!         RequiredField::MinioServer,
//!         RequiredField::MinioAccessKey,
//!         RequiredField::MinioSecret,
//!         RequiredField::PgUsername,
//!         RequiredField::PgDatabase,
//!     ]
//! );
//! ```
//!
//! ## Startup
//!
//! ```rust,no_run
//! use dbhub::adapters::objectstore::ObjectStoreClient;
//! use dbhub::adapters::postgresql::PostgreSQLClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = dbhub::config::load_config()?;
//!
//!     let _store = ObjectStoreClient::new(config.object_store())?;
//!     let _db = PostgreSQLClient::connect(config.pg_connect_params()).await?;
//!
//!     dbhub::server::serve(config.web(), dbhub::server::shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Resolution fails with [`domain::ConfigError`]; the rest of startup uses
//! [`domain::DbhubError`], which wraps it.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod server;
