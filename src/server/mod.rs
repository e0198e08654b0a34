//! HTTPS listener
//!
//! Serves the web front end over TLS. For now there is a single route at `/`
//! returning a placeholder body.

use crate::config::WebServerConfig;
use crate::domain::{DbhubError, Result};
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Body returned by the root handler
pub const PLACEHOLDER_BODY: &str = "Stuff goes here\n";

/// How long in-flight requests get to finish after a shutdown signal
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Build the application router
pub fn router() -> Router {
    Router::new().route("/", get(root_handler))
}

async fn root_handler() -> &'static str {
    PLACEHOLDER_BODY
}

/// Serve the router over HTTPS until `shutdown` completes
///
/// # Errors
///
/// Returns [`DbhubError::Server`] if a `[web]` setting is empty, the listen
/// address does not resolve, the certificate or key cannot be loaded, or the
/// listener fails.
pub async fn serve<F>(config: &WebServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    check_web_config(config)?;

    let addr = resolve_listen_address(&config.listen_address).await?;

    let tls = RustlsConfig::from_pem_file(&config.cert_path, &config.cert_key_path)
        .await
        .map_err(|e| {
            DbhubError::Server(format!(
                "Failed to load certificate {} / key {}: {}",
                config.cert_path, config.cert_key_path, e
            ))
        })?;

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown.await;
        tracing::info!("Shutting down HTTPS listener");
        shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    tracing::info!(address = %addr, "Starting DBHub webserver on https://{}", config.listen_address);

    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(router().into_make_service())
        .await
        .map_err(|e| DbhubError::Server(format!("HTTPS listener failed: {}", e)))
}

/// Completes on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT (Ctrl+C)"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

/// Fail if any `[web]` setting is empty
pub(crate) fn check_web_config(config: &WebServerConfig) -> Result<()> {
    let missing: Vec<&str> = [
        ("web.server", config.listen_address.is_empty()),
        ("web.certificate", config.cert_path.is_empty()),
        ("web.certificate_key", config.cert_key_path.is_empty()),
    ]
    .into_iter()
    .filter_map(|(key, empty)| empty.then_some(key))
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DbhubError::Server(format!(
            "Missing web server setting(s): {}",
            missing.join(", ")
        )))
    }
}

/// Resolve `web.server` to a bind address
///
/// A bare `:port` binds every IPv4 interface.
async fn resolve_listen_address(address: &str) -> Result<SocketAddr> {
    if let Some(port) = address.strip_prefix(':') {
        let port = port
            .parse::<u16>()
            .map_err(|e| DbhubError::Server(format!("Invalid listen address {address}: {e}")))?;
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }

    tokio::net::lookup_host(address)
        .await
        .map_err(|e| DbhubError::Server(format!("Invalid listen address {address}: {e}")))?
        .next()
        .ok_or_else(|| DbhubError::Server(format!("Listen address {address} did not resolve")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn web_config(listen: &str, cert: &str, key: &str) -> WebServerConfig {
        WebServerConfig {
            listen_address: listen.to_string(),
            cert_path: cert.to_string(),
            cert_key_path: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_root_returns_placeholder() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], PLACEHOLDER_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_other_paths_not_found() {
        let response = router()
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_check_web_config_lists_missing() {
        let err = check_web_config(&web_config("", "cert.pem", "")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("web.server"));
        assert!(msg.contains("web.certificate_key"));
        assert!(!msg.contains("web.certificate,"));

        assert!(check_web_config(&web_config("0.0.0.0:8443", "c", "k")).is_ok());
    }

    #[tokio::test]
    async fn test_serve_rejects_missing_settings() {
        let err = serve(&WebServerConfig::default(), async {}).await.unwrap_err();
        assert!(matches!(err, DbhubError::Server(_)));
    }

    #[tokio::test]
    async fn test_serve_rejects_missing_certificate() {
        let config = web_config("127.0.0.1:0", "/nonexistent/cert.pem", "/nonexistent/key.pem");
        let err = serve(&config, async {}).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load certificate"));
    }

    #[tokio::test]
    async fn test_resolve_listen_address() {
        let addr = resolve_listen_address("127.0.0.1:8443").await.unwrap();
        assert_eq!(addr.port(), 8443);
        assert!(resolve_listen_address("no-port").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_port_only_listen_address() {
        let addr = resolve_listen_address(":8443").await.unwrap();
        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 8443)));

        assert!(resolve_listen_address(":70000").await.is_err());
    }
}
