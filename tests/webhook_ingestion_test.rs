// Integration tests for the Apify webhook routes
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use jobportal::testing::requests::{signed_webhook_post, webhook_post};
use jobportal::testing::{FailingSink, RecordingSink, StubUpstream, TestFixtures};
use jobportal::webhook::ForwardSink;
use jobportal::AppComponents;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[actix_web::test]
async fn test_post_is_acknowledged_and_recorded() {
    let sink = Arc::new(RecordingSink::default());
    let components = TestFixtures::components_with_sink(sink.clone());
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let resp = test::call_service(&app, webhook_post(r#"{"foo":"bar"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Data received"}));

    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].payload, json!({"foo": "bar"}));
}

#[actix_web::test]
async fn test_non_post_methods_get_405() {
    let sink = Arc::new(RecordingSink::default());
    let components = TestFixtures::components_with_sink(sink.clone());
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    for req in [
        test::TestRequest::get(),
        test::TestRequest::put(),
        test::TestRequest::delete(),
        test::TestRequest::patch(),
    ] {
        let resp = test::call_service(&app, req.uri("/api/apify/webhook").to_request()).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "POST");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }
    assert!(sink.deliveries().is_empty());
}

#[actix_web::test]
async fn test_apify_test_route() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/apify/test").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "✅ Apify route is working fine!"}));
}

#[actix_web::test]
async fn test_recording_failure_is_a_server_error() {
    let components = TestFixtures::components_with_sink(Arc::new(FailingSink));
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let resp = test::call_service(&app, webhook_post(r#"{"foo":"bar"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Failed to record webhook payload"}));
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let sink = Arc::new(RecordingSink::default());
    let components = TestFixtures::components_with_sink(sink.clone());
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let resp = test::call_service(&app, webhook_post("{not json").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(sink.deliveries().is_empty());
}

#[actix_web::test]
async fn test_signed_deliveries_when_secret_configured() {
    let sink = Arc::new(RecordingSink::default());
    let components =
        AppComponents::with_sink(TestFixtures::signed_webhook_settings(), sink.clone()).unwrap();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let body = r#"{"eventType":"ACTOR.RUN.SUCCEEDED","resource":{"id":"run-1"}}"#;

    let resp = test::call_service(&app, webhook_post(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error, json!({"error": "Invalid signature"}));

    let forged = webhook_post(body)
        .insert_header(("X-Apify-Signature", "sha256=00ff"))
        .to_request();
    let resp = test::call_service(&app, forged).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(sink.deliveries().is_empty());

    let resp = test::call_service(&app, signed_webhook_post(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(sink.deliveries().len(), 1);
    assert_eq!(sink.deliveries()[0].payload["resource"]["id"], "run-1");
}

#[actix_web::test]
async fn test_oversized_body_is_refused() {
    let sink = Arc::new(RecordingSink::default());
    let mut settings = TestFixtures::settings();
    settings.webhook.max_body_bytes = 16;
    let components = AppComponents::with_sink(settings, sink.clone()).unwrap();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let big = json!({"items": vec!["x"; 64]}).to_string();
    let resp = test::call_service(&app, webhook_post(&big).to_request()).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(sink.deliveries().is_empty());
}

#[actix_web::test]
async fn test_non_post_with_oversized_body_still_gets_405() {
    let sink = Arc::new(RecordingSink::default());
    let mut settings = TestFixtures::settings();
    settings.webhook.max_body_bytes = 16;
    let components = AppComponents::with_sink(settings, sink.clone()).unwrap();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let big = json!({"items": vec!["x"; 64]}).to_string();
    for req in [test::TestRequest::get(), test::TestRequest::put()] {
        let req = req
            .uri("/api/apify/webhook")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(big.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }
    assert!(sink.deliveries().is_empty());
}

#[actix_web::test]
async fn test_forward_target_error_is_reported_to_apify() {
    let upstream = StubUpstream::start(StatusCode::INTERNAL_SERVER_ERROR);
    let sink = ForwardSink::new(upstream.url(), Duration::from_secs(5)).unwrap();
    let components = TestFixtures::components_with_sink(Arc::new(sink));
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let resp = test::call_service(&app, webhook_post(r#"{"foo":"bar"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Failed to record webhook payload"}));

    upstream.stop().await;
}
