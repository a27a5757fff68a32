use std::time::Duration;

use bizportal_api::{Client, ClientConfig, Error, RequestDescriptor, RetryPolicy, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn signed_in() -> Session {
    let session = Session::in_memory();
    session.begin("tok-abc", None);
    session
}

#[tokio::test]
async fn get_sends_auth_and_cache_headers() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("customers_page.json");

    Mock::given(method("GET"))
        .and(path("/sales/customers"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer tok-abc"))
        .and(header("x-auth-token", "tok-abc"))
        .and(header("cache-control", "max-age=60, stale-while-revalidate=300"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), signed_in()).unwrap();
    let value = client
        .get_json("/sales/customers", vec![("page".into(), "1".into())])
        .await
        .unwrap();
    assert_eq!(value["total"], 42);
}

#[tokio::test]
async fn post_sends_no_store_directives_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/it/tickets"))
        .and(header("cache-control", "no-store, no-cache, must-revalidate"))
        .and(header("pragma", "no-cache"))
        .and(body_json(json!({"title": "Printer jam"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true, "data": {"id": 5}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), signed_in()).unwrap();
    let value = client
        .send_json(
            reqwest::Method::POST,
            "/it/tickets",
            Some(&json!({"title": "Printer jam"})),
        )
        .await
        .unwrap();
    assert_eq!(value["data"]["id"], 5);
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hr/employees"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Session::in_memory()).unwrap();
    let err = client
        .execute(RequestDescriptor::get("/hr/employees"))
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn timeouts_are_retried_then_surface() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operations/inventory"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(&mock_server.uri())
        .with_timeout(Duration::from_millis(100))
        .with_retry(RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
        });
    let client = Client::new(config, Session::in_memory()).unwrap();
    let err = client
        .execute(RequestDescriptor::get("/operations/inventory"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig::new(&uri).with_retry(RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(1),
    });
    let client = Client::new(config, Session::in_memory()).unwrap();
    let err = client
        .execute(RequestDescriptor::get("/dashboard/stats"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn unauthorized_clears_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&mock_server)
        .await;

    let session = signed_in();
    let client = Client::with_base_url(&mock_server.uri(), session.clone()).unwrap();
    let err = client.get_json("/auth/me", vec![]).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/it/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Session::in_memory()).unwrap();
    let err = client.get_json("/it/assets", vec![]).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}
