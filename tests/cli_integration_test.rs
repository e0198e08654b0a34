//! Integration tests for the command-line entry points
//!
//! These drive `Cli::execute` the way `main` does and check the exit codes.
//! Only configuration failures are exercised; nothing here needs a running
//! MinIO or PostgreSQL.

use clap::Parser;
use dbhub::cli::{Cli, EXIT_CONFIG, EXIT_OK};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID: &str = r#"
[minio]
server = "localhost:9000"
access_key = "AK"
secret = "SECRET"

[pg]
server = "localhost"
port = 5432
username = "u"
database = "d"
"#;

#[tokio::test]
async fn test_validate_config_accepts_complete_file() {
    let file = write_config(VALID);
    let path = file.path().to_string_lossy().to_string();

    let cli = Cli::parse_from(["dbhub", "--config", &path, "validate-config", "--json"]);
    assert_eq!(cli.execute().await.unwrap(), EXIT_OK);
}

#[tokio::test]
async fn test_serve_without_subcommand_stops_on_incomplete_file() {
    let file = write_config("[minio]\nserver = \"localhost:9000\"\n");
    let path = file.path().to_string_lossy().to_string();

    let cli = Cli::parse_from(["dbhub", "--config", &path]);
    assert_eq!(cli.execute().await.unwrap(), EXIT_CONFIG);
}

#[tokio::test]
async fn test_serve_rejects_bad_object_store_endpoint() {
    let contents = format!(
        "{}\n[web]\nserver = \":8443\"\ncertificate = \"cert.pem\"\ncertificate_key = \"key.pem\"\n",
        VALID.replace("localhost:9000", "http://localhost:9000")
    );
    let file = write_config(&contents);
    let path = file.path().to_string_lossy().to_string();

    let cli = Cli::parse_from(["dbhub", "--config", &path, "serve"]);
    assert_eq!(cli.execute().await.unwrap(), EXIT_CONFIG);
}

#[tokio::test]
async fn test_serve_stops_on_empty_web_section() {
    let file = write_config(VALID);
    let path = file.path().to_string_lossy().to_string();

    let cli = Cli::parse_from(["dbhub", "--config", &path, "serve"]);
    assert_eq!(cli.execute().await.unwrap(), EXIT_CONFIG);
}

#[tokio::test]
async fn test_check_reports_unreadable_config() {
    let cli = Cli::parse_from(["dbhub", "--config", "/nonexistent/dbhub/config.toml", "check"]);
    assert_eq!(cli.execute().await.unwrap(), EXIT_CONFIG);
}
