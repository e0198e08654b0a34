// DBHub - Web server bootstrap
// Copyright (c) 2025 DBHub Contributors
// Licensed under the MIT License

use clap::Parser;
use dbhub::cli::{Cli, EXIT_FATAL};
use dbhub::logging::{init_logging, LoggingOptions};
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging_options = LoggingOptions {
        log_dir: cli.log_dir.clone(),
    };
    let guard = match init_logging(&cli.log_level, &logging_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "DBHub server");

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, so flush the file logger first
    drop(guard);
    process::exit(exit_code);
}
