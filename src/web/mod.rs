mod auth;
mod export;
pub mod pages;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::FromRef;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::{run_cleanup_worker, SessionStore, UserDirectory};
use crate::config::Config;
use crate::constants::SESSION_CLEANUP_INTERVAL_SECS;
use crate::youtube::OAuthClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub users: Arc<UserDirectory>,
    pub http: reqwest::Client,
    pub oauth: Arc<OAuthClient>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config, users: UserDirectory) -> Result<Self> {
        let http = config.http_client().context("Failed to build HTTP client")?;
        let oauth = OAuthClient::from_config(http.clone(), &config);
        Ok(Self {
            sessions: Arc::new(SessionStore::new(config.session_ttl)),
            users: Arc::new(users),
            oauth: Arc::new(oauth),
            config: Arc::new(config),
            http,
        })
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Start the dashboard and run until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn serve(config: Config, users: UserDirectory) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let state = AppState::new(config, users)?;
    let shutdown = CancellationToken::new();

    let cleanup = tokio::spawn(run_cleanup_worker(
        state.sessions.clone(),
        Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS),
        shutdown.clone(),
    ));

    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutting down...");
            signal.cancel();
        })
        .await
        .context("Web server error")?;

    shutdown.cancel();
    let _ = cleanup.await;
    info!("Shutdown complete");

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
