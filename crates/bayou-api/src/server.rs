//! Listener lifecycle for the festival API.
//!
//! [`start_server`] binds the address from [`HttpConfig`] and serves until
//! the process is asked to stop (`Ctrl-C`, or `SIGTERM` on Unix).
//! [`serve`] takes an already-bound listener and an arbitrary shutdown
//! future, which is what the integration tests drive.

use std::future::Future;
use std::io;
use std::sync::Arc;

use bayou_core::config::HttpConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Failures while bringing the listener up or running it.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The configured host and port could not be bound.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        /// `host:port` as configured.
        addr: String,
        /// The underlying socket error.
        source: io::Error,
    },

    /// The accept loop died.
    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] io::Error),
}

/// Bind `config.host:config.port` and serve until a stop signal arrives.
///
/// The host may be a name (`localhost`) or a literal address.
///
/// # Errors
///
/// Returns [`HttpError::Bind`] if the address cannot be bound and
/// [`HttpError::Serve`] if serving fails.
pub async fn start_server(config: &HttpConfig, state: Arc<AppState>) -> Result<(), HttpError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| HttpError::Bind {
            addr: format!("{}:{}", config.host, config.port),
            source,
        })?;

    serve(listener, state, stop_signal()).await
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns [`HttpError::Serve`] if the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), HttpError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Cyber Bayou API listening");
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(HttpError::Serve)?;

    info!("Cyber Bayou API drained");
    Ok(())
}

/// Resolves on `Ctrl-C`, or on `SIGTERM` where the platform has one.
async fn stop_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Ctrl-C received"),
        () = terminate => info!("SIGTERM received"),
    }
}
