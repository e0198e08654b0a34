//! PostgreSQL client implementation
//!
//! This module opens the single database session the server holds for its
//! lifetime.

use super::params::{PgConnectParams, PgTlsConfig};
use super::pgpass::{default_pgpass_path, PgPass};
use crate::config::SecretString;
use crate::domain::{DbhubError, Result};
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, NoTls};

/// PostgreSQL client for DBHub
pub struct PostgreSQLClient {
    /// Session handle
    client: Client,

    /// Parameters used to connect, kept for log output
    params: PgConnectParams,
}

impl PostgreSQLClient {
    /// Connect to PostgreSQL
    ///
    /// When `params.password` is `None` the password file is consulted. The
    /// connection driver runs on a spawned task for as long as the client lives.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector cannot be built or the connection fails.
    pub async fn connect(params: PgConnectParams) -> Result<Self> {
        let password = match &params.password {
            Some(password) => Some(password.clone()),
            None => password_from_file(&params),
        };
        let pg_config = params.to_pg_config(password.as_ref());

        let client = match &params.tls {
            None => {
                let (client, connection) = pg_config.connect(NoTls).await.map_err(|e| {
                    DbhubError::Database(format!(
                        "Couldn't connect to database {}: {}",
                        params.address(),
                        e
                    ))
                })?;
                spawn_connection(connection);
                client
            }
            Some(tls) => {
                let connector = tls_connector(tls)?;
                let (client, connection) = pg_config.connect(connector).await.map_err(|e| {
                    DbhubError::Database(format!(
                        "Couldn't connect to database {}: {}",
                        params.address(),
                        e
                    ))
                })?;
                spawn_connection(connection);
                client
            }
        };

        tracing::info!(
            address = %params.address(),
            database = %params.database,
            tls = params.tls.is_some(),
            "Connected to PostgreSQL server"
        );

        Ok(Self { client, params })
    }

    /// Test the connection with a trivial query
    pub async fn ping(&self) -> Result<()> {
        self.client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| DbhubError::Database(format!("Connection test failed: {}", e)))?;

        tracing::debug!("PostgreSQL connection test successful");
        Ok(())
    }

    /// The underlying session
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// `host:port` of the server
    pub fn address(&self) -> String {
        self.params.address()
    }
}

fn password_from_file(params: &PgConnectParams) -> Option<SecretString> {
    let path = default_pgpass_path()?;
    let pgpass = PgPass::load(&path)?;
    let password = pgpass.lookup(&params.host, params.port, &params.database, &params.user);
    if password.is_some() {
        tracing::debug!(path = %path.display(), "Using password from password file");
    }
    password
}

fn tls_connector(tls: &PgTlsConfig) -> Result<MakeTlsConnector> {
    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(tls.accept_invalid_certs)
        .build()
        .map_err(|e| DbhubError::Database(format!("Failed to build TLS connector: {}", e)))?;
    Ok(MakeTlsConnector::new(connector))
}

fn spawn_connection<S, T>(connection: tokio_postgres::Connection<S, T>)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
    T: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(error = %e, "PostgreSQL connection closed with error");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_connector_builds() {
        assert!(tls_connector(&PgTlsConfig::default()).is_ok());
        assert!(tls_connector(&PgTlsConfig {
            accept_invalid_certs: true
        })
        .is_ok());
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Port 1 on loopback is reserved and not listening.
        let params = PgConnectParams {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "dbhub".to_string(),
            password: Some(crate::config::secret_string("pw".to_string())),
            database: "dbhub".to_string(),
            tls: None,
        };

        let err = PostgreSQLClient::connect(params).await.err().unwrap();
        assert!(matches!(err, DbhubError::Database(_)));
        assert!(err.to_string().contains("127.0.0.1:1"));
    }
}
