//! Validate config command implementation
//!
//! Resolves the configuration exactly as `serve` would and prints a summary
//! with secrets redacted.

use super::resolve_config;
use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::ResolvedConfig;
use clap::Args;
use serde::Serialize;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Redacted view of the resolved configuration
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub minio_server: String,
    pub minio_access_key: String,
    pub minio_https: bool,
    pub pg_server: String,
    pub pg_port: u16,
    pub pg_username: String,
    pub pg_database: String,
    /// Whether a password came from the file or `PG_PASS`
    pub pg_password_set: bool,
    pub datagen_server: String,
    pub datagen_https: bool,
    pub web_server: String,
    pub web_certificate: String,
    pub web_certificate_key: String,
}

impl From<&ResolvedConfig> for ConfigSummary {
    fn from(config: &ResolvedConfig) -> Self {
        let store = config.object_store();
        let db = config.database();
        Self {
            minio_server: store.endpoint.clone(),
            minio_access_key: store.access_key.clone(),
            minio_https: store.use_tls,
            pg_server: db.host.clone(),
            pg_port: db.port,
            pg_username: db.username.clone(),
            pg_database: db.database_name.clone(),
            pg_password_set: db.password.is_some(),
            datagen_server: config.datagen().endpoint.clone(),
            datagen_https: config.datagen().use_tls,
            web_server: config.web().listen_address.clone(),
            web_certificate: config.web().cert_path.clone(),
            web_certificate_key: config.web().cert_key_path.clone(),
        }
    }
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(config_path = ?config_path, "Validating configuration");

        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration is invalid");
                eprintln!();
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let summary = ConfigSummary::from(&config);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(EXIT_OK);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Minio Server: {}", summary.minio_server);
        println!("  Minio HTTPS: {}", summary.minio_https);
        println!("  Minio Access Key: {}", summary.minio_access_key);
        println!("  PostgreSQL Server: {}:{}", summary.pg_server, summary.pg_port);
        println!("  PostgreSQL User: {}", summary.pg_username);
        println!("  PostgreSQL Database: {}", summary.pg_database);
        println!(
            "  PostgreSQL Password: {}",
            if summary.pg_password_set {
                "set"
            } else {
                "not set (password file will be used)"
            }
        );
        if !summary.datagen_server.is_empty() {
            println!("  Data Generator: {}", summary.datagen_server);
        }
        println!("  Web Server: {}", summary.web_server);
        println!();
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, EnvSnapshot};

    const CONTENTS: &str = r#"
[minio]
server = "localhost:9000"
access_key = "AK"
secret = "SECRET"

[pg]
server = "localhost"
port = 5432
username = "u"
password = "pw"
database = "d"

[web]
server = "0.0.0.0:8443"
"#;

    #[test]
    fn test_summary_redacts_secrets() {
        let config = resolve(CONTENTS, &EnvSnapshot::empty()).unwrap();
        let summary = ConfigSummary::from(&config);
        let json = serde_json::to_string(&summary).unwrap();

        assert!(summary.pg_password_set);
        assert_eq!(summary.web_server, "0.0.0.0:8443");
        assert!(!json.contains("SECRET"));
        assert!(!json.contains("\"pw\""));
        assert!(json.contains("\"pg_port\":5432"));
    }

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let code = ValidateArgs::default()
            .execute(Some(Path::new("/nonexistent/dbhub.toml")))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
