//! Check command implementation
//!
//! Resolves the configuration and probes both backends without starting the
//! listener.

use super::resolve_config;
use crate::adapters::objectstore::ObjectStoreClient;
use crate::adapters::postgresql::PostgreSQLClient;
use crate::cli::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_OK};
use clap::Args;
use std::path::Path;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Skip the object store probe
    #[arg(long)]
    pub skip_object_store: bool,

    /// Skip the database probe
    #[arg(long)]
    pub skip_database: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration is invalid");
                eprintln!();
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };
        println!("✅ Configuration resolved");

        let mut healthy = true;

        if !self.skip_object_store {
            let endpoint = &config.object_store().endpoint;
            let result = match ObjectStoreClient::new(config.object_store()) {
                Ok(store) => store.health_check().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => println!("✅ Object store reachable: {endpoint}"),
                Err(e) => {
                    healthy = false;
                    println!("❌ Object store check failed: {endpoint}");
                    println!("   Error: {e}");
                }
            }
        }

        if !self.skip_database {
            let params = config.pg_connect_params();
            let address = params.address();
            let result = match PostgreSQLClient::connect(params).await {
                Ok(db) => db.ping().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => println!("✅ PostgreSQL reachable: {address}"),
                Err(e) => {
                    healthy = false;
                    println!("❌ PostgreSQL check failed: {address}");
                    println!("   Error: {e}");
                }
            }
        }

        Ok(if healthy { EXIT_OK } else { EXIT_CONNECTION })
    }
}
