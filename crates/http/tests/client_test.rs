//! Integration tests for stitch-http against a local mock server.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stitch_core::Connection;
use stitch_http::{AuthScheme, HttpError, SecureClient};

#[tokio::test]
async fn sends_authorization_and_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer token-1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let client = SecureClient::new(AuthScheme::Bearer, "token-1");
    let body = client.get_json(&format!("{}/ping", server.uri())).await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn carries_connection_extra_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Basic c2VjcmV0"))
        .and(header("X-Team", "data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let conn = Connection {
        conn_id: "stitch".into(),
        host: Some(server.uri()),
        password: "c2VjcmV0".into(),
        extra: Some(r#"{"X-Team":"data"}"#.into()),
    };
    let client = SecureClient::from_connection(AuthScheme::Basic, &conn).unwrap();
    client.get_json(&format!("{}/ping", server.uri())).await.unwrap();
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such source"))
        .mount(&server)
        .await;

    let client = SecureClient::new(AuthScheme::Bearer, "t");
    let err = client
        .get_json(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    match err {
        HttpError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such source");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = SecureClient::new(AuthScheme::Bearer, "t");
    let err = client
        .get_json(&format!("{}/html", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_)));
}

#[tokio::test]
async fn post_json_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(serde_json::json!({"source": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "j1"})))
        .mount(&server)
        .await;

    let client = SecureClient::new(AuthScheme::Bearer, "t");
    let body = client
        .post_json(
            &format!("{}/jobs", server.uri()),
            Some(&serde_json::json!({"source": 1})),
        )
        .await
        .unwrap();
    assert_eq!(body["id"], "j1");
}
