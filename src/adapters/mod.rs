//! External system integrations for DBHub.
//!
//! - [`objectstore`] - MinIO object store client
//! - [`postgresql`] - PostgreSQL connector
//!
//! Both are built from the resolved configuration at startup:
//!
//! ```rust,no_run
//! use dbhub::adapters::objectstore::ObjectStoreClient;
//! use dbhub::adapters::postgresql::PostgreSQLClient;
//!
//! # async fn example() -> dbhub::domain::Result<()> {
//! let config = dbhub::config::load_config()?;
//!
//! let store = ObjectStoreClient::new(config.object_store())?;
//! let db = PostgreSQLClient::connect(config.pg_connect_params()).await?;
//! db.ping().await?;
//! # Ok(())
//! # }
//! ```

pub mod objectstore;
pub mod postgresql;
