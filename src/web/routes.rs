use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::auth::{locked_response, login_post, logout};
use super::export::export_xlsx;
use super::pages;
use super::AppState;
use crate::auth::{generate_state_token, CurrentSession, RequireLogin};
use crate::report::{build_channel_report, ChannelReport, ReportError};
use crate::youtube::{Credentials, OAuthError, YouTubeClient};

const RECONNECT_MESSAGE: &str = "Sua conexão com o Google expirou. Conecte novamente.";

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", post(login_post))
        .route("/logout", post(logout))
        .route("/oauth/connect", get(oauth_connect))
        .route("/oauth/callback", get(oauth_callback))
        .route("/export.xlsx", get(export_xlsx))
        .route("/healthz", get(health))
}

/// Why the channel report could not be loaded for a session.
#[derive(Debug, Error)]
pub(super) enum LoadError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Refresh the session's credentials if needed, then fetch the report.
///
/// Refreshed credentials are written back to the session behind `token`.
/// On an OAuth failure the stale credentials are dropped so the user
/// reconnects. A session removed while the request was in flight stays gone.
pub(super) async fn load_report(
    state: &AppState,
    token: &str,
    credentials: &Credentials,
) -> Result<ChannelReport, LoadError> {
    let credentials = match state.oauth.ensure_fresh(credentials).await {
        Ok((fresh, refreshed)) => {
            if refreshed {
                debug!("Refreshed Google access token");
                let stored = fresh.clone();
                if state
                    .sessions
                    .update(token, |s| s.credentials = Some(stored))
                    .is_none()
                {
                    debug!("Session ended before refreshed token could be stored");
                }
            }
            fresh
        }
        Err(e) => {
            state.sessions.update(token, |s| s.credentials = None);
            return Err(e.into());
        }
    };

    let client = YouTubeClient::new(
        state.http.clone(),
        &state.config.youtube_api_url,
        credentials.access_token,
    );
    Ok(build_channel_report(&client, state.config.recent_video_count).await?)
}

async fn home(State(state): State<AppState>, current: CurrentSession) -> Response {
    let Some(username) = current.session.username.clone() else {
        if current.session.login_attempts > state.config.max_login_attempts {
            return locked_response();
        }
        return Html(pages::render_login_page(None, None).into_string()).into_response();
    };

    let Some(credentials) = current.session.credentials.clone() else {
        return Html(pages::render_connect_page(&username, None).into_string()).into_response();
    };

    match load_report(&state, &current.token, &credentials).await {
        Ok(report) => {
            Html(pages::render_dashboard_page(&username, &report).into_string()).into_response()
        }
        Err(LoadError::OAuth(e)) => {
            warn!(username = %username, error = %e, "Google credentials unusable, asking to reconnect");
            Html(pages::render_connect_page(&username, Some(RECONNECT_MESSAGE)).into_string())
                .into_response()
        }
        Err(LoadError::Report(e)) => {
            error!(username = %username, error = %e, "Failed to load channel report");
            (
                StatusCode::BAD_GATEWAY,
                Html(pages::render_error_page(&username, &e.to_string()).into_string()),
            )
                .into_response()
        }
    }
}

/// GET /oauth/connect - Send the user to the Google consent screen.
async fn oauth_connect(
    State(state): State<AppState>,
    RequireLogin(current): RequireLogin,
) -> Response {
    let oauth_state = generate_state_token();
    let url = match state.oauth.authorization_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Failed to build Google authorization URL");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Configuração OAuth inválida")
                .into_response();
        }
    };

    let stored = state
        .sessions
        .update(&current.token, |s| s.oauth_state = Some(oauth_state));
    if stored.is_none() {
        return Redirect::to("/").into_response();
    }
    Redirect::to(url.as_str()).into_response()
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// GET /oauth/callback - Finish the authorization-code flow.
async fn oauth_callback(
    State(state): State<AppState>,
    RequireLogin(current): RequireLogin,
    Query(params): Query<CallbackParams>,
) -> Response {
    let username = current.session.username.clone().unwrap_or_default();
    let expected_state = state
        .sessions
        .update(&current.token, |s| s.oauth_state.take())
        .flatten();

    if let Some(reason) = params.error {
        warn!(username = %username, reason = %reason, "Google authorization denied");
        let message = format!("Autorização negada: {reason}");
        return Html(pages::render_connect_page(&username, Some(&message)).into_string())
            .into_response();
    }

    let state_matches = matches!(
        (expected_state.as_deref(), params.state.as_deref()),
        (Some(expected), Some(got)) if expected == got
    );
    if !state_matches {
        warn!(username = %username, "OAuth callback with mismatched state");
        return (
            StatusCode::BAD_REQUEST,
            Html(
                pages::render_connect_page(&username, Some("Estado OAuth inválido"))
                    .into_string(),
            ),
        )
            .into_response();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Html(
                pages::render_connect_page(&username, Some("Código de autorização ausente"))
                    .into_string(),
            ),
        )
            .into_response();
    };

    match state.oauth.exchange_code(&code).await {
        Ok(credentials) => {
            let stored = state
                .sessions
                .update(&current.token, |s| s.credentials = Some(credentials));
            match stored {
                Some(()) => info!(username = %username, "Google account connected"),
                None => warn!(username = %username, "Session ended before Google connection was stored"),
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            error!(username = %username, error = %e, "Failed to exchange authorization code");
            (
                StatusCode::BAD_GATEWAY,
                Html(
                    pages::render_connect_page(&username, Some("Falha ao conectar ao Google"))
                        .into_string(),
                ),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "OK"
}
