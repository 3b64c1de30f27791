//! Shared constants used across the application.

/// User agent sent on every outgoing API request.
pub const USER_AGENT: &str = concat!("youtube-analytics/", env!("CARGO_PKG_VERSION"));

/// How often expired dashboard sessions are purged.
pub const SESSION_CLEANUP_INTERVAL_SECS: u64 = 300;
