//! Integration tests for the subscription webhook: signature
//! verification and payload validation. All of these fail before any
//! database access.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, TEST_WEBHOOK_SECRET};
use tavolo_api::webhook::{sign, SIGNATURE_HEADER};

const WEBHOOK_URI: &str = "/api/v1/webhooks/subscriptions";

fn signature_for(body: &str) -> String {
    sign(TEST_WEBHOOK_SECRET, body.as_bytes())
}

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_signature_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(app, WEBHOOK_URI, &[], "{}").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].as_str().unwrap().contains("signature"));
}

#[tokio::test]
async fn invalid_signature_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        WEBHOOK_URI,
        &[(SIGNATURE_HEADER, "deadbeef")],
        "{}",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signature_over_different_body_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let signature = sign(TEST_WEBHOOK_SECRET, b"{\"other\":true}");
    let response = post_json(
        app,
        WEBHOOK_URI,
        &[(SIGNATURE_HEADER, signature.as_str())],
        "{}",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Payload validation (after a valid signature)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let body = "not json";
    let signature = signature_for(body);
    let response = post_json(app, WEBHOOK_URI, &[(SIGNATURE_HEADER, signature.as_str())], body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_plan_returns_validation_error() {
    let app = common::build_test_app(common::lazy_pool());
    let body = r#"{
        "tenant_id": 7,
        "external_ref": "sub_123",
        "plan": "weekly",
        "status": "active",
        "period_start": "2026-08-01"
    }"#;
    let signature = signature_for(body);
    let response = post_json(app, WEBHOOK_URI, &[(SIGNATURE_HEADER, signature.as_str())], body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("Unknown plan"));
}

#[tokio::test]
async fn unknown_status_returns_validation_error() {
    let app = common::build_test_app(common::lazy_pool());
    let body = r#"{
        "tenant_id": 7,
        "external_ref": "sub_123",
        "plan": "monthly",
        "status": "trialing",
        "period_start": "2026-08-01"
    }"#;
    let signature = signature_for(body);
    let response = post_json(app, WEBHOOK_URI, &[(SIGNATURE_HEADER, signature.as_str())], body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("status"));
}

#[tokio::test]
async fn empty_external_ref_returns_validation_error() {
    let app = common::build_test_app(common::lazy_pool());
    let body = r#"{
        "tenant_id": 7,
        "external_ref": "",
        "plan": "monthly",
        "status": "active",
        "period_start": "2026-08-01"
    }"#;
    let signature = signature_for(body);
    let response = post_json(app, WEBHOOK_URI, &[(SIGNATURE_HEADER, signature.as_str())], body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
