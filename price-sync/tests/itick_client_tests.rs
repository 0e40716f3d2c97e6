use common::model::MarketClassification;
use price_sync::{ItickClient, PriceSyncConfig, QuoteProvider};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ItickClient {
    let config = PriceSyncConfig::new("test-token", "", "").with_itick_base_url(server.uri());
    ItickClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_quote_sends_token_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/quote"))
        .and(query_param("code", "AAPL"))
        .and(query_param("region", "us"))
        .and(header("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "data": {"s": "AAPL", "ld": 187.25, "o": 185.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let quote = client
        .fetch_quote("AAPL", &MarketClassification::from_symbol("AAPL"))
        .await
        .unwrap();

    assert_eq!(quote.symbol, "AAPL");
    assert_eq!(quote.price().unwrap(), Some(dec!(187.25)));
}

#[tokio::test]
async fn test_forex_symbol_keeps_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forex/quote"))
        .and(query_param("code", "GBP/JPY"))
        .and(query_param("region", "gb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"c": 191.4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let quote = client
        .fetch_quote("GBP/JPY", &MarketClassification::from_symbol("GBP/JPY"))
        .await
        .unwrap();

    assert_eq!(quote.price().unwrap(), Some(dec!(191.4)));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .fetch_quote("AAPL", &MarketClassification::from_symbol("AAPL"))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_non_zero_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1,
            "msg": "invalid token",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_quote("AAPL", &MarketClassification::from_symbol("AAPL"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid token"));
}

#[tokio::test]
async fn test_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .fetch_quote("AAPL", &MarketClassification::from_symbol("AAPL"))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .fetch_quote("AAPL", &MarketClassification::from_symbol("AAPL"))
        .await;

    assert!(result.is_err());
}
