//! Integration tests for `GourmetClient` using wiremock HTTP mocks.

use gourmet_api::{build_query, id_query, ApiError, FailureKind, GourmetClient};
use gourmet_core::{Amenity, Coordinates, SearchCriteria, SearchRange};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GourmetClient {
    GourmetClient::with_base_url(Some("test-key"), 5, "gourmet-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn criteria() -> SearchCriteria {
    SearchCriteria::new(SearchRange::new(3).unwrap())
        .with_location(Coordinates::new(35.0, 139.0))
        .with_amenity(Amenity::Wifi)
}

#[tokio::test]
async fn fetch_shops_sends_criteria_and_fixed_params() {
    let server = MockServer::start().await;

    let body = json!({
        "results": {
            "results_available": 25,
            "shop": [{"id": "J001", "name": "Sushi Dai"}, {"id": "J002", "name": "Tsukiji"}]
        }
    });

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .and(query_param("key", "test-key"))
        .and(query_param("format", "json"))
        .and(query_param("count", "20"))
        .and(query_param("start", "1"))
        .and(query_param("range", "3"))
        .and(query_param("lat", "35"))
        .and(query_param("lng", "139"))
        .and(query_param("wifi", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect("should parse shops");

    assert_eq!(result.total_available, 25);
    assert_eq!(result.shops.len(), 2);
    assert_eq!(result.shops[0].id, "J001");
    assert_eq!(result.shops[1].name, "Tsukiji");
}

#[tokio::test]
async fn fetch_shops_normalizes_single_object_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .and(query_param("id", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"shop": {"id": "A"}, "results_available": 1}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_shops(&id_query(&["A".to_string()]), 1)
        .await
        .expect("single object should parse");

    assert_eq!(result.shops.len(), 1);
    assert_eq!(result.shops[0].id, "A");
    assert_eq!(result.total_available, 1);
}

#[tokio::test]
async fn fetch_shops_accepts_string_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"shop": [], "results_available": "0"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect("empty listing should parse");

    assert!(result.shops.is_empty());
    assert_eq!(result.total_available, 0);
}

#[tokio::test]
async fn fetch_shops_surfaces_embedded_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"error": [{"message": "boom", "code": 3000}]}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect_err("embedded error must fail");

    assert!(matches!(err, ApiError::Upstream(ref m) if m == "boom"), "{err:?}");
    assert_eq!(err.kind(), FailureKind::Upstream);
}

#[tokio::test]
async fn fetch_shops_non_success_status_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect_err("502 must fail");

    assert!(
        matches!(err, ApiError::UnexpectedStatus { status: 502, ref url } if !url.contains("test-key")),
        "{err:?}"
    );
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn fetch_shops_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gourmet/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect_err("html must fail");

    assert!(matches!(err, ApiError::Deserialize { .. }), "{err:?}");
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn fetch_shops_without_key_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = GourmetClient::with_base_url(None, 5, "gourmet-test/0.1", &server.uri())
        .expect("client construction should not fail");
    let err = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect_err("missing key must fail");

    assert!(matches!(err, ApiError::MissingApiKey));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

#[tokio::test]
async fn unreachable_server_is_offline() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1");
    let err = client
        .fetch_shops(&build_query(&criteria()), 1)
        .await
        .expect_err("connection must fail");

    assert!(err.is_offline(), "{err:?}");
    assert_eq!(err.user_message(), "Check your network connection.");
}

#[tokio::test]
async fn list_genres_returns_master_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/genre/v1/"))
        .and(query_param("key", "test-key"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {
                "genre": [
                    {"code": "G001", "name": "Izakaya"},
                    {"code": "G013", "name": "Ramen"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let genres = client.list_genres().await.expect("should parse genres");

    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].code, "G013");
    assert_eq!(genres[1].name, "Ramen");
}

#[tokio::test]
async fn list_budgets_missing_listing_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/budget/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let budgets = client.list_budgets().await.expect("should parse budgets");
    assert!(budgets.is_empty());
}
