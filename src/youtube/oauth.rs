//! Google OAuth2 authorization-code flow for the YouTube read-only scope.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;

pub const YOUTUBE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/youtube.readonly";

/// Tokens expiring within this window are treated as expired.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid authorization endpoint: {0}")]
    InvalidAuthUrl(#[from] url::ParseError),
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token endpoint rejected the request: {error}: {description}")]
    Rejected { error: String, description: String },
    #[error("credentials expired and no refresh token is available")]
    Expired,
}

/// Credentials cached in a dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - Duration::seconds(EXPIRY_SKEW_SECS) <= now)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

impl TokenResponse {
    fn into_credentials(self, now: DateTime<Utc>, previous_refresh: Option<String>) -> Credentials {
        Credentials {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// Web-application OAuth client.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
}

impl OAuthClient {
    #[must_use]
    pub fn from_config(http: Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            auth_url: config.google_auth_url.clone(),
            token_url: config.google_token_url.clone(),
        }
    }

    /// Build the consent URL the user is sent to.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a URL.
    pub fn authorization_url(&self, state: &str) -> Result<Url, OAuthError> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", YOUTUBE_READONLY_SCOPE),
                ("state", state),
                ("access_type", "offline"),
                ("include_granted_scopes", "true"),
                ("prompt", "consent"),
            ],
        )?;
        Ok(url)
    }

    /// Exchange an authorization code for credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint fails or rejects the code.
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials, OAuthError> {
        let token = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .await?;
        info!("Exchanged authorization code for YouTube credentials");
        Ok(token.into_credentials(Utc::now(), None))
    }

    /// Obtain a fresh access token using the refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Expired`] without a refresh token, or an error
    /// if the token endpoint fails.
    pub async fn refresh(&self, credentials: &Credentials) -> Result<Credentials, OAuthError> {
        let Some(refresh_token) = credentials.refresh_token.as_deref() else {
            return Err(OAuthError::Expired);
        };
        let token = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .await?;
        debug!("Refreshed YouTube access token");
        Ok(token.into_credentials(Utc::now(), credentials.refresh_token.clone()))
    }

    /// Return usable credentials, refreshing them if they have expired.
    ///
    /// The flag is true when a refresh happened and the caller should store
    /// the new credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if refreshing is needed but fails.
    pub async fn ensure_fresh(
        &self,
        credentials: &Credentials,
    ) -> Result<(Credentials, bool), OAuthError> {
        if credentials.is_expired(Utc::now()) {
            Ok((self.refresh(credentials).await?, true))
        } else {
            Ok((credentials.clone(), false))
        }
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse, OAuthError> {
        let response = self.http.post(&self.token_url).form(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(e) => OAuthError::Rejected {
                    error: e.error,
                    description: e.error_description,
                },
                Err(_) => OAuthError::Rejected {
                    error: status.to_string(),
                    description: body,
                },
            });
        }

        Ok(response.json().await?)
    }
}
