//! YouTube Data API access: OAuth2 credentials and the read-only client.

pub mod client;
pub mod models;
pub mod oauth;

use async_trait::async_trait;
use thiserror::Error;

pub use client::YouTubeClient;
pub use models::{Channel, Video};
pub use oauth::{Credentials, OAuthClient, OAuthError, YOUTUBE_READONLY_SCOPE};

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("YouTube request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("YouTube API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Source of the channel data a report is built from.
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// The channel owned by the authorized account, if it has one.
    async fn my_channel(&self) -> Result<Option<Channel>, YouTubeError>;

    /// IDs of the channel's most recent videos, newest first.
    async fn recent_video_ids(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YouTubeError>;

    /// Snippet and statistics for one video.
    async fn video(&self, video_id: &str) -> Result<Option<Video>, YouTubeError>;
}
