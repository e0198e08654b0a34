//! Serve command implementation
//!
//! Startup runs strictly in order: resolve configuration, check the `[web]`
//! settings, build the object store client, connect to PostgreSQL, then start
//! the HTTPS listener. Any failure before the listener starts ends the process.

use super::resolve_config;
use crate::adapters::objectstore::ObjectStoreClient;
use crate::adapters::postgresql::PostgreSQLClient;
use crate::cli::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_OK};
use crate::log_startup_failure;
use crate::server;
use clap::Args;
use std::path::Path;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_startup_failure!(&e, "resolve configuration");
                eprintln!("Configuration file problem\n\n{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Err(e) = server::check_web_config(config.web()) {
            log_startup_failure!(&e, "web server configuration");
            eprintln!("Configuration file problem\n\n{e}");
            return Ok(EXIT_CONFIG);
        }

        let store = match ObjectStoreClient::new(config.object_store()) {
            Ok(s) => s,
            Err(e) => {
                log_startup_failure!(&e, "object store client");
                eprintln!("Problem with Minio server configuration: \n\n{e}");
                return Ok(EXIT_CONFIG);
            }
        };
        tracing::info!(endpoint = %config.object_store().endpoint, "Minio server config ok");

        let db = match PostgreSQLClient::connect(config.pg_connect_params()).await {
            Ok(db) => db,
            Err(e) => {
                log_startup_failure!(&e, "database connection");
                eprintln!("Couldn't connect to database\n\n{e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        server::serve(config.web(), server::shutdown_signal()).await?;

        tracing::info!(
            database = %db.address(),
            object_store = %store.base_url(),
            "Server stopped"
        );
        Ok(EXIT_OK)
    }
}
