use std::collections::HashMap;
use std::sync::Arc;

use base44_rust::auth::NoopNavigator;
use base44_rust::config::ClientOptions;
use base44_rust::entities::{ListingCategory, ListingStatus, NewMarketListing};
use base44_rust::error::Error;
use base44_rust::session::{MemoryTokenStore, TokenStore};
use base44_rust::Base44;
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches only requests that carry no Authorization header at all
struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .iter()
            .all(|(name, _)| name.as_str().to_ascii_lowercase() != "authorization")
    }
}

fn client_with_store(uri: &str, store: Arc<MemoryTokenStore>) -> Base44 {
    Base44::new_with_options(
        uri,
        store,
        Arc::new(NoopNavigator),
        ClientOptions::default(),
    )
}

#[tokio::test]
async fn request_without_token_sends_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "listings": [{ "id": "l1" }, { "id": "l2" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let body = base44
        .request("/listings", Method::GET, None, None)
        .await
        .unwrap();
    assert_eq!(body["listings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn request_with_token_attaches_bearer_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "listings": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set("abc123");
    let base44 = client_with_store(&mock_server.uri(), store);

    base44
        .request("/listings", Method::GET, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_status_becomes_api_error_with_exact_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let result = base44.request("/listings", Method::GET, None, None).await;
    match result {
        Err(Error::Api { status, endpoint }) => {
            assert_eq!(status, 503);
            assert_eq!(endpoint, "/listings");
        }
        other => panic!("expected Error::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_json_body_becomes_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let result = base44.request("/listings", Method::GET, None, None).await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/listings"))
        .and(header("Content-Type", "application/merge-patch+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let mut headers = HashMap::new();
    headers.insert(
        "Content-Type".to_string(),
        "application/merge-patch+json".to_string(),
    );

    base44
        .request(
            "/listings",
            Method::POST,
            Some(&json!({ "title": "Fresh Maize" })),
            Some(&headers),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn token_is_read_fresh_at_call_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set("soon-to-be-gone");
    let base44 = client_with_store(&mock_server.uri(), store.clone());

    // A logout between constructing the client and issuing the call must
    // not leave a stale token on the wire.
    store.clear();

    base44
        .request("/listings", Method::GET, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn configured_request_timeout_reaches_the_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let base44 = Base44::new_with_options(
        &mock_server.uri(),
        Arc::new(MemoryTokenStore::new()),
        Arc::new(NoopNavigator),
        ClientOptions::default()
            .with_request_timeout(Some(std::time::Duration::from_millis(50))),
    );

    let result = base44.request("/listings", Method::GET, None, None).await;
    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn listing_collection_lists_with_order_and_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/MarketListing"))
        .and(query_param("order", "-created_date"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "l1",
            "title": "Fresh Maize",
            "category": "crops",
            "price": 120.0,
            "unit": "kg",
            "location": "Nakuru",
            "seller_name": "Wanjiku",
            "status": "active",
            "created_date": "2025-08-20T08:30:00Z"
        }])))
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let listings = base44
        .market_listings()
        .list(Some("-created_date"), Some(5))
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Fresh Maize");
    assert_eq!(listings[0].category, ListingCategory::Crops);
    assert_eq!(listings[0].status, ListingStatus::Active);
}

#[tokio::test]
async fn listing_collection_filters_by_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/MarketListing"))
        .and(query_param("status", "active"))
        .and(query_param("order", "-created_date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let listings = base44
        .market_listings()
        .filter(&[("status", "active")], Some("-created_date"))
        .await
        .unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn creating_a_listing_returns_the_stored_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities/MarketListing"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "l9",
            "title": "Fresh Maize",
            "category": "crops",
            "price": 120.0,
            "unit": "kg",
            "quantity_available": 40.0,
            "location": "Nakuru",
            "seller_name": "Wanjiku",
            "status": "active",
            "created_date": "2025-08-20T08:30:00Z"
        })))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set("abc123");
    let base44 = client_with_store(&mock_server.uri(), store);

    let new_listing = NewMarketListing {
        title: "Fresh Maize".to_string(),
        category: ListingCategory::Crops,
        price: 120.0,
        unit: "kg".to_string(),
        quantity_available: Some(40.0),
        description: None,
        location: "Nakuru".to_string(),
        seller_name: "Wanjiku".to_string(),
        seller_phone: None,
        seller_email: None,
        image_url: None,
        status: ListingStatus::Active,
    };

    let stored = base44
        .market_listings()
        .create(&new_listing)
        .await
        .unwrap();
    assert_eq!(stored.id, "l9");
    assert_eq!(stored.quantity_available, Some(40.0));
}

#[tokio::test]
async fn trend_collection_failure_carries_entity_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/MarketTrend"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let base44 = client_with_store(&mock_server.uri(), Arc::new(MemoryTokenStore::new()));

    let result = base44.market_trends().list(None, None).await;
    match result {
        Err(Error::Api { status, endpoint }) => {
            assert_eq!(status, 500);
            assert_eq!(endpoint, "/entities/MarketTrend");
        }
        other => panic!("expected Error::Api, got {:?}", other),
    }
}
