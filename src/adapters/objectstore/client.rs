//! Object store client
//!
//! Construction validates the endpoint and prepares an HTTP client without
//! touching the network, so a bad `[minio]` section fails startup before any
//! connection is attempted.

use crate::config::{ObjectStoreConfig, SecretString};
use crate::domain::{DbhubError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Path of the MinIO liveness probe
const HEALTH_PATH: &str = "/minio/health/live";

/// Client for the MinIO object store
pub struct ObjectStoreClient {
    base_url: Url,
    access_key: String,
    secret_key: SecretString,
    http: Client,
}

impl std::fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

impl ObjectStoreClient {
    /// Create a new object store client
    ///
    /// # Errors
    ///
    /// Returns [`DbhubError::ObjectStore`] if the endpoint is not a bare
    /// `host:port` or the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dbhub::adapters::objectstore::ObjectStoreClient;
    ///
    /// # fn example() -> dbhub::domain::Result<()> {
    /// let config = dbhub::config::load_config()?;
    /// let client = ObjectStoreClient::new(config.object_store())?;
    /// println!("{}", client.base_url());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &ObjectStoreConfig) -> Result<Self> {
        let base_url = endpoint_url(&config.endpoint, config.use_tls)?;

        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DbhubError::ObjectStore(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
            http,
        })
    }

    /// Base URL derived from the endpoint and TLS flag
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access key the client signs requests with
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Secret key the client signs requests with
    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }

    /// Whether requests go over HTTPS
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    /// Probe the MinIO liveness endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or answers with a non-2xx status.
    pub async fn health_check(&self) -> Result<()> {
        let url = self
            .base_url
            .join(HEALTH_PATH)
            .map_err(|e| DbhubError::ObjectStore(format!("Invalid health URL: {e}")))?;

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!(endpoint = %self.base_url, error = %e, "Object store health check failed");
            DbhubError::ObjectStore(format!("Object store unreachable: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(endpoint = %self.base_url, status = %status, "Object store health check failed");
            return Err(DbhubError::ObjectStore(format!(
                "Object store health check returned {status}"
            )));
        }

        tracing::info!(endpoint = %self.base_url, "Object store health check passed");
        Ok(())
    }
}

/// Turn a `host:port` endpoint into a base URL
fn endpoint_url(endpoint: &str, use_tls: bool) -> Result<Url> {
    if endpoint.is_empty() {
        return Err(DbhubError::ObjectStore("Endpoint is empty".to_string()));
    }
    if endpoint.contains(['/', '?', '#', '@']) {
        return Err(DbhubError::ObjectStore(format!(
            "Endpoint {endpoint:?} must be host:port without scheme or path"
        )));
    }

    let scheme = if use_tls { "https" } else { "http" };
    let url = Url::parse(&format!("{scheme}://{endpoint}"))
        .map_err(|e| DbhubError::ObjectStore(format!("Invalid endpoint {endpoint:?}: {e}")))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(DbhubError::ObjectStore(format!(
            "Endpoint {endpoint:?} has no host"
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use test_case::test_case;

    fn config(endpoint: &str, use_tls: bool) -> ObjectStoreConfig {
        ObjectStoreConfig {
            endpoint: endpoint.to_string(),
            access_key: "AK".to_string(),
            secret_key: secret_string("SECRET".to_string()),
            use_tls,
        }
    }

    #[test]
    fn test_base_url_follows_tls_flag() {
        let plain = ObjectStoreClient::new(&config("localhost:9000", false)).unwrap();
        assert_eq!(plain.base_url().as_str(), "http://localhost:9000/");
        assert!(!plain.is_secure());

        let secure = ObjectStoreClient::new(&config("minio.example.com", true)).unwrap();
        assert_eq!(secure.base_url().as_str(), "https://minio.example.com/");
        assert!(secure.is_secure());
    }

    #[test_case("" ; "empty")]
    #[test_case("http://localhost:9000" ; "scheme")]
    #[test_case("localhost:9000/bucket" ; "path")]
    #[test_case("localhost:9000?x=1" ; "query")]
    #[test_case("user@localhost:9000" ; "userinfo")]
    #[test_case("localhost:notaport" ; "bad port")]
    fn test_rejects_invalid_endpoint(endpoint: &str) {
        let err = ObjectStoreClient::new(&config(endpoint, false)).unwrap_err();
        assert!(matches!(err, DbhubError::ObjectStore(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = ObjectStoreClient::new(&config("localhost:9000", false)).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("AK"));
        assert!(!debug.contains("SECRET"));
    }

    #[tokio::test]
    async fn test_health_check_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", HEALTH_PATH)
            .with_status(200)
            .create_async()
            .await;

        let client = ObjectStoreClient::new(&config(&server.host_with_port(), false)).unwrap();
        assert!(client.health_check().await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_health_check_unhealthy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", HEALTH_PATH)
            .with_status(503)
            .create_async()
            .await;

        let client = ObjectStoreClient::new(&config(&server.host_with_port(), false)).unwrap();
        let err = client.health_check().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
