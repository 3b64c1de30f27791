//! Per-video report records and the length-based suggestions shown for them.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::youtube::models::Video;
use crate::youtube::{ChannelSource, YouTubeError};

/// Titles longer than this should be shortened.
pub const TITLE_MAX_CHARS: usize = 60;
/// Descriptions shorter than this should be lengthened.
pub const DESCRIPTION_MIN_CHARS: usize = 200;

pub const SUGGESTION_OK: &str = "OK";
pub const SHORTEN_TITLE: &str = "Reduzir título para < 60 caracteres";
pub const LENGTHEN_DESCRIPTION: &str = "Aumentar descrição para >= 200 caracteres";

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("the authorized account has no YouTube channel")]
    NoChannel,
    #[error("invalid {field} count: {value:?}")]
    InvalidCount { field: &'static str, value: String },
    #[error(transparent)]
    YouTube(#[from] YouTubeError),
}

/// Strip everything except ASCII letters, digits and whitespace.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    DISALLOWED.replace_all(text, "").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TitleSuggestion {
    Ok,
    Shorten,
}

impl TitleSuggestion {
    #[must_use]
    pub fn evaluate(title: &str) -> Self {
        if title.chars().count() <= TITLE_MAX_CHARS {
            Self::Ok
        } else {
            Self::Shorten
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => SUGGESTION_OK,
            Self::Shorten => SHORTEN_TITLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DescriptionSuggestion {
    Ok,
    Lengthen,
}

impl DescriptionSuggestion {
    #[must_use]
    pub fn evaluate(description: &str) -> Self {
        if description.chars().count() >= DESCRIPTION_MIN_CHARS {
            Self::Ok
        } else {
            Self::Lengthen
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => SUGGESTION_OK,
            Self::Lengthen => LENGTHEN_DESCRIPTION,
        }
    }
}

/// Evaluate both suggestions for an already sanitized title and description.
#[must_use]
pub fn evaluate(title: &str, description: &str) -> (TitleSuggestion, DescriptionSuggestion) {
    (
        TitleSuggestion::evaluate(title),
        DescriptionSuggestion::evaluate(description),
    )
}

/// One row of the dashboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoReport {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub title_suggestion: TitleSuggestion,
    pub description_suggestion: DescriptionSuggestion,
}

impl VideoReport {
    /// Build a report row from an API video resource.
    ///
    /// # Errors
    ///
    /// Returns an error if a statistic is present but not a number.
    pub fn from_video(video: &Video) -> Result<Self, ReportError> {
        let title = sanitize_text(&video.snippet.title);
        let description = sanitize_text(&video.snippet.description);
        let (title_suggestion, description_suggestion) = evaluate(&title, &description);
        let stats = &video.statistics;

        Ok(Self {
            video_id: video.id.clone(),
            title,
            published_at: video.snippet.published_at,
            views: parse_count("view", stats.view_count.as_deref())?,
            likes: parse_count("like", stats.like_count.as_deref())?,
            comments: parse_count("comment", stats.comment_count.as_deref())?,
            title_suggestion,
            description_suggestion,
        })
    }
}

/// Channel summary plus its recent videos, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    pub channel_id: String,
    pub channel_title: String,
    pub subscribers: u64,
    pub videos: Vec<VideoReport>,
}

fn parse_count(field: &'static str, value: Option<&str>) -> Result<u64, ReportError> {
    match value {
        None => Ok(0),
        Some(v) => v.parse().map_err(|_| ReportError::InvalidCount {
            field,
            value: v.to_string(),
        }),
    }
}

/// Sort rows by publication time, oldest first, keeping API order for ties.
pub fn sort_by_published(videos: &mut [VideoReport]) {
    videos.sort_by_key(|v| v.published_at);
}

/// Fetch the authorized channel and its most recent videos and build the report.
///
/// # Errors
///
/// Returns an error if the account has no channel, an API call fails, or a
/// statistic is malformed.
pub async fn build_channel_report(
    source: &dyn ChannelSource,
    max_results: u32,
) -> Result<ChannelReport, ReportError> {
    let channel = source.my_channel().await?.ok_or(ReportError::NoChannel)?;
    let subscribers = parse_count(
        "subscriber",
        channel.statistics.subscriber_count.as_deref(),
    )?;

    let video_ids = source.recent_video_ids(&channel.id, max_results).await?;
    let mut videos = Vec::with_capacity(video_ids.len());
    for video_id in &video_ids {
        match source.video(video_id).await? {
            Some(video) => videos.push(VideoReport::from_video(&video)?),
            None => warn!(video_id = %video_id, "Video listed in search but not returned by videos.list"),
        }
    }
    sort_by_published(&mut videos);

    info!(
        channel_id = %channel.id,
        videos = videos.len(),
        subscribers,
        "Built channel report"
    );

    Ok(ChannelReport {
        channel_id: channel.id,
        channel_title: channel.snippet.title,
        subscribers,
        videos,
    })
}
