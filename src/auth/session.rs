//! Per-browser dashboard sessions.
//!
//! Everything the dashboard remembers about a visitor (who logged in, how
//! many login attempts were made, the pending OAuth state and the cached
//! Google credentials) lives in a [`Session`] keyed by a random cookie token.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::youtube::Credentials;

pub const SESSION_COOKIE: &str = "session";

/// Generate a cryptographically secure random session token.
pub fn generate_session_token() -> String {
    random_token(64)
}

/// Generate the anti-forgery `state` value for an OAuth round trip.
pub fn generate_state_token() -> String {
    random_token(32)
}

fn random_token(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Result of a login form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidCredentials,
    TooManyAttempts,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub login_attempts: u32,
    pub oauth_state: Option<String>,
    pub credentials: Option<Credentials>,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            username: None,
            login_attempts: 0,
            oauth_state: None,
            credentials: None,
            last_seen: Instant::now(),
        }
    }
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// In-memory session store with an idle timeout.
///
/// Every write happens under the store's lock, so concurrent requests on one
/// cookie never overwrite each other's changes.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a live session and refresh its idle timer. Expired sessions
    /// are dropped.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.write();
        match sessions.get_mut(token) {
            Some(session) if !session.is_expired(self.ttl) => {
                session.last_seen = Instant::now();
                Some(session.clone())
            }
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Store a session, refreshing its idle timer.
    pub fn save(&self, token: &str, mut session: Session) {
        session.last_seen = Instant::now();
        self.write().insert(token.to_string(), session);
    }

    /// Apply `change` to a live session in place.
    ///
    /// Returns `None` without writing anything when the session no longer
    /// exists, e.g. after a logout.
    pub fn update<R>(&self, token: &str, change: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.write();
        let session = sessions
            .get_mut(token)
            .filter(|session| !session.is_expired(self.ttl))?;
        session.last_seen = Instant::now();
        Some(change(session))
    }

    /// Count one login submission, creating the session if needed, and
    /// return the new total.
    pub fn record_login_attempt(&self, token: &str) -> u32 {
        let mut sessions = self.write();
        let session = sessions.entry(token.to_string()).or_default();
        if session.is_expired(self.ttl) {
            *session = Session::default();
        }
        session.last_seen = Instant::now();
        session.login_attempts = session.login_attempts.saturating_add(1);
        session.login_attempts
    }

    /// Count a login attempt and, while under the limit, run `verify`.
    ///
    /// Once more than `max_attempts` submissions have been made on `token`
    /// the session stays refused and `verify` is no longer called. Success
    /// does not mark the session authenticated; see [`SessionStore::promote`].
    pub fn attempt_login(
        &self,
        token: &str,
        max_attempts: u32,
        verify: impl FnOnce() -> bool,
    ) -> LoginOutcome {
        if self.record_login_attempt(token) > max_attempts {
            LoginOutcome::TooManyAttempts
        } else if verify() {
            LoginOutcome::Success
        } else {
            LoginOutcome::InvalidCredentials
        }
    }

    /// Mark the session behind `token` as logged in as `username` and move
    /// it to a freshly generated token, which is returned. The old token
    /// stops working.
    pub fn promote(&self, token: &str, username: &str) -> String {
        let mut sessions = self.write();
        let mut session = sessions.remove(token).unwrap_or_default();
        session.username = Some(username.to_string());
        session.last_seen = Instant::now();

        let new_token = generate_session_token();
        sessions.insert(new_token.clone(), session);
        new_token
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.write().remove(token)
    }

    /// Drop every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl));
        before - sessions.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
