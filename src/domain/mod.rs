//! Domain types for DBHub.
//!
//! The domain layer is small: the error hierarchy and the crate-wide
//! [`Result`] alias.
//!
//! # Error Handling
//!
//! Configuration resolution reports a structured [`ConfigError`]; the rest of
//! the startup path uses [`DbhubError`], which wraps it:
//!
//! ```rust,no_run
//! use dbhub::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = dbhub::config::load_config()?;
//!     println!("PostgreSQL at {}", config.database().host);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::{ConfigError, DbhubError, OverrideCause, ParseCause, RequiredField};
pub use result::Result;
