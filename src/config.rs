use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Dashboard login
    pub users_file: PathBuf,
    pub max_login_attempts: u32,
    pub session_ttl: Duration,

    // Google OAuth
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_auth_url: String,
    pub google_token_url: String,

    // YouTube Data API
    pub youtube_api_url: String,
    pub recent_video_count: u32,

    // Outbound HTTP
    pub http_timeout: Duration,

    // Exchange ticker
    pub exchange_public_url: String,
    pub exchange_symbol: String,
}

pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_EXCHANGE_PUBLIC_URL: &str = "https://api.binance.us/api/v3";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Google credentials may be absent here so that the `bundle` and
    /// `ticker` commands work without them; [`Config::validate`] rejects
    /// them for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8501)?,

            // Dashboard login
            users_file: PathBuf::from(env_or_default("USERS_FILE", "./users.toml")),
            max_login_attempts: parse_env_u32("MAX_LOGIN_ATTEMPTS", 5)?,
            session_ttl: Duration::from_secs(parse_env_u64("SESSION_TTL_SECS", 3600)?),

            // Google OAuth
            google_client_id: env_or_default("GOOGLE_CLIENT_ID", ""),
            google_client_secret: env_or_default("GOOGLE_CLIENT_SECRET", ""),
            google_redirect_uri: env_or_default("GOOGLE_REDIRECT_URI", ""),
            google_auth_url: env_or_default("GOOGLE_AUTH_URL", DEFAULT_GOOGLE_AUTH_URL),
            google_token_url: env_or_default("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL),

            // YouTube Data API
            youtube_api_url: env_or_default("YOUTUBE_API_URL", DEFAULT_YOUTUBE_API_URL),
            recent_video_count: parse_env_u32("RECENT_VIDEO_COUNT", 10)?,

            // Outbound HTTP
            http_timeout: Duration::from_secs(parse_env_u64("HTTP_TIMEOUT_SECS", 30)?),

            // Exchange ticker
            exchange_public_url: env_or_default("EXCHANGE_PUBLIC_URL", DEFAULT_EXCHANGE_PUBLIC_URL),
            exchange_symbol: env_or_default("EXCHANGE_SYMBOL", "BTC/USDT"),
        })
    }

    /// Build the HTTP client shared by the Google and exchange clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(crate::constants::USER_AGENT)
            .build()
    }

    /// Validate that the configuration can run the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("GOOGLE_CLIENT_ID", &self.google_client_id),
            ("GOOGLE_CLIENT_SECRET", &self.google_client_secret),
            ("GOOGLE_REDIRECT_URI", &self.google_redirect_uri),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingEnvVar(name.to_string()));
            }
        }
        if url::Url::parse(&self.google_redirect_uri).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "GOOGLE_REDIRECT_URI".to_string(),
                message: "must be an absolute URL".to_string(),
            });
        }
        if self.max_login_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_LOGIN_ATTEMPTS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(1..=50).contains(&self.recent_video_count) {
            return Err(ConfigError::InvalidValue {
                name: "RECENT_VIDEO_COUNT".to_string(),
                message: "must be between 1 and 50".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration with fixed values for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            users_file: PathBuf::from("./users.toml"),
            max_login_attempts: 5,
            session_ttl: Duration::from_secs(3600),
            google_client_id: "test-client-id".to_string(),
            google_client_secret: "test-client-secret".to_string(),
            google_redirect_uri: "http://localhost:8501/oauth/callback".to_string(),
            google_auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
            google_token_url: DEFAULT_GOOGLE_TOKEN_URL.to_string(),
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            recent_video_count: 10,
            http_timeout: Duration::from_secs(10),
            exchange_public_url: DEFAULT_EXCHANGE_PUBLIC_URL.to_string(),
            exchange_symbol: "BTC/USDT".to_string(),
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_testing_is_valid() {
        assert!(Config::for_testing().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_google_client() {
        let config = Config {
            google_client_id: String::new(),
            ..Config::for_testing()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEnvVar(name)) if name == "GOOGLE_CLIENT_ID"
        ));
    }

    #[test]
    fn test_validate_relative_redirect_uri() {
        let config = Config {
            google_redirect_uri: "/oauth/callback".to_string(),
            ..Config::for_testing()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_video_count_bounds() {
        let zero = Config {
            recent_video_count: 0,
            ..Config::for_testing()
        };
        assert!(zero.validate().is_err());

        let too_many = Config {
            recent_video_count: 51,
            ..Config::for_testing()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_env_u32("NONEXISTENT_VAR_FOR_TEST", 5).unwrap(), 5);
        assert_eq!(parse_env_u16("NONEXISTENT_VAR_FOR_TEST", 8501).unwrap(), 8501);
    }
}
