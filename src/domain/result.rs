//! Result type alias for DBHub
//!
//! This module provides a convenient Result type alias that uses [`DbhubError`]
//! as the error type.

use super::errors::DbhubError;

/// Result type alias for DBHub operations
///
/// # Examples
///
/// ```
/// use dbhub::domain::result::Result;
/// use dbhub::domain::errors::DbhubError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DbhubError::Server("listen address not set".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DbhubError>;
