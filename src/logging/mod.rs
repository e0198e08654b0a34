//! Logging and observability
//!
//! Structured logging via `tracing`: human-readable console output plus an
//! optional JSON file sink.
//!
//! # Example
//!
//! ```no_run
//! use dbhub::logging::{init_logging, LoggingOptions};
//!
//! let _guard = init_logging("info", &LoggingOptions::default()).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LoggingOptions};

/// Log a startup step that failed, with the error as a structured field
///
/// # Example
///
/// ```no_run
/// use dbhub::log_startup_failure;
/// use dbhub::domain::DbhubError;
///
/// let error = DbhubError::Server("bind failed".to_string());
/// log_startup_failure!(&error, "Starting HTTPS listener");
/// ```
#[macro_export]
macro_rules! log_startup_failure {
    ($error:expr, $step:expr) => {
        tracing::error!(
            error = %$error,
            step = $step,
            "Startup step failed"
        );
    };
}
