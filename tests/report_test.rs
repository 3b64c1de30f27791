//! Integration tests for the YouTube client and channel report against a
//! mocked Data API.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_analytics::report::{
    build_channel_report, DescriptionSuggestion, ReportError, TitleSuggestion,
};
use youtube_analytics::youtube::{ChannelSource, YouTubeClient, YouTubeError};

const TOKEN: &str = "test-access-token";

fn client(server: &MockServer) -> YouTubeClient {
    YouTubeClient::new(reqwest::Client::new(), &server.uri(), TOKEN)
}

async fn mount_channel(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("mine", "true"))
        .and(query_param("part", "snippet,statistics"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UC123",
                "snippet": {"title": "Canal Teste", "description": "Sobre o canal"},
                "statistics": {
                    "subscriberCount": "1500",
                    "videoCount": "3",
                    "viewCount": "90000",
                    "hiddenSubscriberCount": false
                }
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, ids: &[&str]) {
    let items: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": {"kind": "youtube#video", "videoId": id}}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UC123"))
        .and(query_param("order", "date"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

async fn mount_video(server: &MockServer, id: &str, title: &str, description: &str, published: &str, views: &str) {
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": id,
                "snippet": {
                    "title": title,
                    "description": description,
                    "publishedAt": published
                },
                "statistics": {"viewCount": views, "likeCount": "7", "commentCount": "2"}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_report_sorted_oldest_first() {
    let server = MockServer::start().await;
    mount_channel(&server).await;
    // Search returns newest first.
    mount_search(&server, &["new", "mid", "old"]).await;
    mount_video(&server, "new", "Newest upload", "short", "2024-03-01T10:00:00Z", "300").await;
    mount_video(&server, "mid", "Middle upload", &"d".repeat(200), "2024-02-01T10:00:00Z", "200").await;
    mount_video(&server, "old", &"t".repeat(61), "short", "2024-01-01T10:00:00Z", "100").await;

    let report = build_channel_report(&client(&server), 10)
        .await
        .expect("report should build");

    assert_eq!(report.channel_id, "UC123");
    assert_eq!(report.channel_title, "Canal Teste");
    assert_eq!(report.subscribers, 1500);

    let ids: Vec<_> = report.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, ["old", "mid", "new"]);
    assert!(report
        .videos
        .windows(2)
        .all(|w| w[0].published_at <= w[1].published_at));

    assert_eq!(report.videos[0].title_suggestion, TitleSuggestion::Shorten);
    assert_eq!(report.videos[1].description_suggestion, DescriptionSuggestion::Ok);
    assert_eq!(report.videos[2].description_suggestion, DescriptionSuggestion::Lengthen);
    assert_eq!(report.videos[2].views, 300);
    assert_eq!(report.videos[2].likes, 7);
    assert_eq!(report.videos[2].comments, 2);
}

#[tokio::test]
async fn test_report_sanitizes_title() {
    let server = MockServer::start().await;
    mount_channel(&server).await;
    mount_search(&server, &["v1"]).await;
    mount_video(&server, "v1", "Olá, mundo! #1", "", "2024-01-01T00:00:00Z", "5").await;

    let report = build_channel_report(&client(&server), 10).await.unwrap();
    assert_eq!(report.videos[0].title, "Ol mundo 1");
}

#[tokio::test]
async fn test_report_skips_missing_video() {
    let server = MockServer::start().await;
    mount_channel(&server).await;
    mount_search(&server, &["gone", "v1"]).await;
    mount_video(&server, "v1", "Present", "", "2024-01-01T00:00:00Z", "5").await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let report = build_channel_report(&client(&server), 10).await.unwrap();
    assert_eq!(report.videos.len(), 1);
    assert_eq!(report.videos[0].video_id, "v1");
}

#[tokio::test]
async fn test_report_no_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = build_channel_report(&client(&server), 10).await.unwrap_err();
    assert!(matches!(err, ReportError::NoChannel));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "Quota exceeded"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).my_channel().await.unwrap_err();
    match err {
        YouTubeError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Quota exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_ignores_non_video_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": {"kind": "youtube#playlist"}},
                {"id": {"kind": "youtube#video", "videoId": "abc"}}
            ]
        })))
        .mount(&server)
        .await;

    let ids = client(&server).recent_video_ids("UC123", 5).await.unwrap();
    assert_eq!(ids, ["abc"]);
}
