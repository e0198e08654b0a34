//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for DBHub using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Success
pub const EXIT_OK: i32 = 0;
/// Configuration could not be resolved or is unusable
pub const EXIT_CONFIG: i32 = 2;
/// A backend could not be reached
pub const EXIT_CONNECTION: i32 = 4;
/// Anything else
pub const EXIT_FATAL: i32 = 5;

/// DBHub web server
#[derive(Parser, Debug)]
#[command(name = "dbhub")]
#[command(version, about, long_about = None)]
#[command(author = "DBHub Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ~/.dbhub/config.toml)
    #[arg(short, long, env = "DBHUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "DBHUB_LOG_LEVEL", global = true)]
    pub log_level: String,

    /// Also write JSON logs to this directory
    #[arg(long, env = "DBHUB_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to the backends and start the HTTPS listener
    Serve(commands::serve::ServeArgs),

    /// Resolve the configuration and print a redacted summary
    ValidateConfig(commands::validate::ValidateArgs),

    /// Resolve the configuration and probe the object store and database
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Run the selected command, returning the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let config = self.config.as_deref();
        match &self.command {
            None => commands::serve::ServeArgs::default().execute(config).await,
            Some(Commands::Serve(args)) => args.execute(config).await,
            Some(Commands::ValidateConfig(args)) => args.execute(config).await,
            Some(Commands::Check(args)) => args.execute(config).await,
        }
    }
}
