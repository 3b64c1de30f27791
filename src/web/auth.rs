use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::{get_client_ip, session_cookie, CurrentSession, LoginOutcome, SESSION_COOKIE};
use crate::web::{pages, AppState};

pub const TOO_MANY_ATTEMPTS: &str = "Muitas tentativas. Tente novamente mais tarde.";
pub const INVALID_CREDENTIALS: &str = "Usuário ou senha incorretos";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// POST /login - Check the submitted credentials against the users file.
///
/// A successful login moves the session to a new token.
pub async fn login_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    current: CurrentSession,
    Form(form): Form<LoginForm>,
) -> Response {
    if current.session.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    let ip = get_client_ip(&headers);
    let users = &state.users;
    let outcome = state.sessions.attempt_login(
        &current.token,
        state.config.max_login_attempts,
        || users.authenticate(&form.username, &form.password),
    );
    let cookie = current.is_new.then(|| session_cookie(&current.token));

    match outcome {
        LoginOutcome::Success => {
            let token = state.sessions.promote(&current.token, &form.username);
            tracing::info!(username = %form.username, ip = %ip, "User logged in");
            with_cookie(Redirect::to("/").into_response(), Some(session_cookie(&token)))
        }
        LoginOutcome::InvalidCredentials => {
            tracing::warn!(username = %form.username, ip = %ip, "Failed login attempt");
            let page = Html(
                pages::render_login_page(Some(INVALID_CREDENTIALS), Some(&form.username))
                    .into_string(),
            );
            with_cookie(page.into_response(), cookie)
        }
        LoginOutcome::TooManyAttempts => {
            tracing::warn!(ip = %ip, "Login refused after too many attempts");
            with_cookie(locked_response(), cookie)
        }
    }
}

/// POST /logout - Drop the session and clear the cookie.
pub async fn logout(State(state): State<AppState>, current: CurrentSession) -> Response {
    if let Some(session) = state.sessions.remove(&current.token) {
        if let Some(username) = session.username {
            tracing::info!(username = %username, "User logged out");
        }
    }

    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

/// The page every request gets once a session is over the login limit.
pub fn locked_response() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Html(pages::render_locked_page(TOO_MANY_ATTEMPTS).into_string()),
    )
        .into_response()
}

/// Attach a `Set-Cookie` header when one is given.
fn with_cookie(mut response: Response, cookie: Option<String>) -> Response {
    if let Some(value) = cookie.and_then(|c| c.parse().ok()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
