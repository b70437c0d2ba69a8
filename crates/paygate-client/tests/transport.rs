//! HTTP transport integration tests.

mod common;

use std::time::Duration;

use common::TestHarness;
use paygate_client::{ClientError, RequestOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn success_body_is_decoded() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path(TestHarness::path("/ping")))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&harness.server)
        .await;

    let body = harness
        .client
        .transport()
        .get("/ping", &RequestOptions::new())
        .await
        .expect("request should succeed");

    assert_eq!(body, Some(json!({"ok": true})));
}

#[tokio::test]
async fn empty_success_body_is_none() {
    let harness = TestHarness::new().await;

    Mock::given(method("DELETE"))
        .and(path(TestHarness::path("/thing")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&harness.server)
        .await;

    let body = harness
        .client
        .transport()
        .delete("/thing", &RequestOptions::new())
        .await
        .expect("request should succeed");

    assert_eq!(body, None);
}

#[tokio::test]
async fn forbidden_maps_to_authorization() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path(TestHarness::path("/secret")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&harness.server)
        .await;

    let err = harness
        .client
        .transport()
        .get("/secret", &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Authorization { status: 403 }));
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path(TestHarness::path("/broken")))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&harness.server)
        .await;

    let err = harness
        .client
        .transport()
        .get("/broken", &RequestOptions::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.starts_with("HTTP 500"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn unprocessable_without_details_is_api_error() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(TestHarness::path("/customers")))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad"))
        .mount(&harness.server)
        .await;

    let err = harness
        .client
        .transport()
        .post("/customers", &json!({}), &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 422, .. }));
}

#[tokio::test]
async fn per_request_timeout_applies() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path(TestHarness::path("/slow")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&harness.server)
        .await;

    let options = RequestOptions::new().with_timeout(Duration::from_millis(50));
    let err = harness
        .client
        .transport()
        .get("/slow", &options)
        .await
        .unwrap_err();

    match err {
        ClientError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}
