use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{ApiErrorEnvelope, Channel, ListResponse, SearchResult, Video};
use super::{ChannelSource, YouTubeError};

/// Read-only YouTube Data API v3 client bound to one access token.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl YouTubeClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, access_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn get(&self, resource: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/{resource}", self.base_url))
            .bearer_auth(&self.access_token)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ListResponse<T>, YouTubeError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map_or_else(|_| body.clone(), |e| e.error.message);
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChannelSource for YouTubeClient {
    async fn my_channel(&self) -> Result<Option<Channel>, YouTubeError> {
        let request = self
            .get("channels")
            .query(&[("part", "snippet,statistics"), ("mine", "true")]);
        let list: ListResponse<Channel> = self.list(request).await?;
        Ok(list.items.into_iter().next())
    }

    async fn recent_video_ids(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YouTubeError> {
        let max_results = max_results.to_string();
        let request = self.get("search").query(&[
            ("part", "snippet"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", max_results.as_str()),
        ]);
        let list: ListResponse<SearchResult> = self.list(request).await?;

        let ids: Vec<String> = list
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        debug!(channel_id, count = ids.len(), "Fetched recent video ids");
        Ok(ids)
    }

    async fn video(&self, video_id: &str) -> Result<Option<Video>, YouTubeError> {
        let request = self
            .get("videos")
            .query(&[("part", "statistics,snippet"), ("id", video_id)]);
        let list: ListResponse<Video> = self.list(request).await?;
        Ok(list.items.into_iter().next())
    }
}
