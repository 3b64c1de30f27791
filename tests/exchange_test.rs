//! Integration tests for the public exchange ticker.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_analytics::exchange::{Binance, ExchangeError};

fn ticker_body() -> serde_json::Value {
    json!({
        "symbol": "BTCUSDT",
        "priceChange": "-120.50",
        "priceChangePercent": "-0.180",
        "weightedAvgPrice": "66950.12",
        "prevClosePrice": "67000.00",
        "lastPrice": "66879.50",
        "lastQty": "0.0010",
        "bidPrice": "66870.00",
        "bidQty": "0.5",
        "askPrice": "66890.00",
        "askQty": "0.25",
        "openPrice": "67000.00",
        "highPrice": "67500.00",
        "lowPrice": "66500.00",
        "volume": "12.345",
        "quoteVolume": "826500.10",
        "openTime": 1_717_000_000_000_i64,
        "closeTime": 1_717_086_400_000_i64,
        "firstId": 1,
        "lastId": 2,
        "count": 2
    })
}

#[tokio::test]
async fn test_fetch_ticker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/24hr"))
        .and(query_param("symbol", "BTCUSDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticker_body()))
        .expect(1)
        .mount(&server)
        .await;

    let ticker = Binance::new(reqwest::Client::new(), &server.uri())
        .fetch_ticker("BTC/USDT")
        .await
        .unwrap();

    assert_eq!(ticker.symbol, "BTC/USDT");
    assert_eq!(ticker.timestamp, 1_717_086_400_000);
    assert_eq!(ticker.datetime.to_rfc3339(), "2024-05-30T16:26:40+00:00");
    assert!((ticker.last - 66879.5).abs() < f64::EPSILON);
    assert!((ticker.close - ticker.last).abs() < f64::EPSILON);
    assert!((ticker.bid - 66870.0).abs() < f64::EPSILON);
    assert!((ticker.ask_volume - 0.25).abs() < f64::EPSILON);
    assert!((ticker.high - 67500.0).abs() < f64::EPSILON);
    assert!((ticker.base_volume - 12.345).abs() < 1e-9);

    let json = serde_json::to_value(&ticker).unwrap();
    assert!(json.get("quoteVolume").is_some());
    assert!(json.get("previousClose").is_some());
}

#[tokio::test]
async fn test_fetch_ticker_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/24hr"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": -1121,
            "msg": "Invalid symbol."
        })))
        .mount(&server)
        .await;

    let err = Binance::new(reqwest::Client::new(), &server.uri())
        .fetch_ticker("FOO/BAR")
        .await
        .unwrap_err();

    match err {
        ExchangeError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, -1121);
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_symbol_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = Binance::new(reqwest::Client::new(), &server.uri())
        .fetch_ticker("BTCUSDT")
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::BadSymbol(_)));
}
