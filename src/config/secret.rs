//! Credential wrappers
//!
//! The MinIO secret key and the PostgreSQL password are wrapped in
//! [`SecretString`] as soon as configuration is resolved. The wrapper zeroes
//! its memory on drop and prints as redacted under `{:?}`. There is no
//! `Display`; reading the value takes an explicit `expose_secret()`.
//!
//! ```rust
//! use dbhub::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("minio123".to_string());
//! assert!(!format!("{key:?}").contains("minio123"));
//!
//! let exposed: &str = key.expose_secret().as_ref();
//! assert_eq!(exposed, "minio123");
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use zeroize::Zeroize;

/// Credential text, zeroed on drop
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

// Stays redacted after `expose_secret()`
impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A credential held for the life of the process
pub type SecretString = Secret<SecretValue>;

/// Wrap a credential
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}

/// Wrap an optional credential
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}
