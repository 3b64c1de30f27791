use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};

use super::session::{generate_session_token, Session, SessionStore, SESSION_COOKIE};

/// The visitor's session, resolved from the `session` cookie.
///
/// `session` is a snapshot taken when the request arrived. Visitors without
/// a live session get a fresh, unsaved one (`is_new`). Handlers write changes
/// through [`SessionStore`] rather than saving the snapshot back.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub session: Session,
    pub is_new: bool,
}

/// `Set-Cookie` value binding the browser to `token`.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    Arc<SessionStore>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = Arc::<SessionStore>::from_ref(state);

        let existing = session_token(parts)
            .and_then(|token| store.get(token).map(|session| (token.to_string(), session)));

        Ok(match existing {
            Some((token, session)) => Self {
                token,
                session,
                is_new: false,
            },
            None => Self {
                token: generate_session_token(),
                session: Session::default(),
                is_new: true,
            },
        })
    }
}

/// A session that has passed the login form.
/// Unauthenticated visitors are redirected to the dashboard root.
#[derive(Debug, Clone)]
pub struct RequireLogin(pub CurrentSession);

#[async_trait]
impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
    Arc<SessionStore>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let current = match CurrentSession::from_request_parts(parts, state).await {
            Ok(current) => current,
            Err(never) => match never {},
        };

        if current.session.is_authenticated() {
            Ok(RequireLogin(current))
        } else {
            Err(Redirect::to("/").into_response())
        }
    }
}

fn session_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("cookie")
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
            })
        })
        .filter(|token| !token.is_empty())
}

/// Get client IP address from request headers (for logging).
pub fn get_client_ip(headers: &HeaderMap) -> String {
    // Check X-Forwarded-For header (if behind proxy)
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return first_ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    "unknown".to_string()
}
