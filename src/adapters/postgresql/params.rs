//! PostgreSQL connection parameters
//!
//! Derived from the resolved configuration and consumed by
//! [`super::PostgreSQLClient::connect`].

use crate::config::SecretString;
use secrecy::ExposeSecret;

/// Transport security for the database connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgTlsConfig {
    /// Accept certificates that fail verification
    ///
    /// **SECURITY WARNING**: only for development databases with self-signed
    /// certificates.
    pub accept_invalid_certs: bool,
}

/// Everything the connector needs to open a session
#[derive(Debug, Clone)]
pub struct PgConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,

    /// `None` means "look it up in the password file"
    pub password: Option<SecretString>,

    pub database: String,

    /// Transport security, `None` for a plain connection
    pub tls: Option<PgTlsConfig>,
}

impl PgConnectParams {
    /// Enable transport security
    pub fn with_tls(mut self, tls: PgTlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// `host:port` for log output
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the `tokio_postgres` configuration
    ///
    /// `password` is the effective password after any password file lookup.
    pub(crate) fn to_pg_config(&self, password: Option<&SecretString>) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .dbname(&self.database)
            .application_name("dbhub");

        if let Some(password) = password {
            let password: &str = password.expose_secret().as_ref();
            config.password(password);
        }

        config.ssl_mode(if self.tls.is_some() {
            tokio_postgres::config::SslMode::Require
        } else {
            tokio_postgres::config::SslMode::Disable
        });

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use tokio_postgres::config::{Host, SslMode};

    fn params() -> PgConnectParams {
        PgConnectParams {
            host: "db.example.com".to_string(),
            port: 5433,
            user: "dbhub".to_string(),
            password: None,
            database: "hub".to_string(),
            tls: None,
        }
    }

    #[test]
    fn test_to_pg_config_plain() {
        let config = params().to_pg_config(None);

        assert_eq!(config.get_hosts(), &[Host::Tcp("db.example.com".to_string())]);
        assert_eq!(config.get_ports(), &[5433]);
        assert_eq!(config.get_user(), Some("dbhub"));
        assert_eq!(config.get_dbname(), Some("hub"));
        assert_eq!(config.get_password(), None);
        assert_eq!(config.get_ssl_mode(), SslMode::Disable);
    }

    #[test]
    fn test_to_pg_config_with_password_and_tls() {
        let password = secret_string("pw".to_string());
        let config = params()
            .with_tls(PgTlsConfig::default())
            .to_pg_config(Some(&password));

        assert_eq!(config.get_password(), Some(&b"pw"[..]));
        assert_eq!(config.get_ssl_mode(), SslMode::Require);
    }

    #[test]
    fn test_address() {
        assert_eq!(params().address(), "db.example.com:5433");
    }
}
