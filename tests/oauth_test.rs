//! Integration tests for the Google token endpoint client.

use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_analytics::config::Config;
use youtube_analytics::youtube::{Credentials, OAuthClient, OAuthError};

fn oauth_client(server: &MockServer) -> OAuthClient {
    let mut config = Config::for_testing();
    config.google_token_url = format!("{}/token", server.uri());
    OAuthClient::from_config(reqwest::Client::new(), &config)
}

fn expired(refresh_token: Option<&str>) -> Credentials {
    Credentials {
        access_token: "old-access".to_string(),
        refresh_token: refresh_token.map(String::from),
        expires_at: Some(Utc::now() - Duration::minutes(5)),
    }
}

#[tokio::test]
async fn test_exchange_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("client_secret=test-client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "refresh_token": "refresh-1",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = oauth_client(&server).exchange_code("auth-code").await.unwrap();

    assert_eq!(creds.access_token, "new-access");
    assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
    let expires_at = creds.expires_at.expect("expiry should be set");
    assert!(expires_at > Utc::now() + Duration::minutes(55));
    assert!(!creds.is_expired(Utc::now()));
}

#[tokio::test]
async fn test_exchange_code_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Bad Request"
        })))
        .mount(&server)
        .await;

    let err = oauth_client(&server).exchange_code("stale").await.unwrap_err();
    match err {
        OAuthError::Rejected { error, description } => {
            assert_eq!(error, "invalid_grant");
            assert_eq!(description, "Bad Request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ensure_fresh_refreshes_and_keeps_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "refreshed-access",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (creds, refreshed) = oauth_client(&server)
        .ensure_fresh(&expired(Some("refresh-1")))
        .await
        .unwrap();

    assert!(refreshed);
    assert_eq!(creds.access_token, "refreshed-access");
    assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_ensure_fresh_without_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = oauth_client(&server)
        .ensure_fresh(&expired(None))
        .await
        .unwrap_err();
    assert!(matches!(err, OAuthError::Expired));
}

#[tokio::test]
async fn test_ensure_fresh_keeps_valid_credentials() {
    let server = MockServer::start().await;
    let creds = Credentials {
        access_token: "still-good".to_string(),
        refresh_token: None,
        expires_at: Some(Utc::now() + Duration::hours(1)),
    };

    let (fresh, refreshed) = oauth_client(&server).ensure_fresh(&creds).await.unwrap();
    assert!(!refreshed);
    assert_eq!(fresh, creds);
}
