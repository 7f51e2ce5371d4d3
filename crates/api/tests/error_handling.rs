//! Integration tests for the error response envelope.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, get_authed};

// ---------------------------------------------------------------------------
// Test: database failures surface as a sanitized 500 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_database_returns_sanitized_500() {
    // The lazy pool points at a refusing port, so the first real query
    // fails; the handler must answer with the standard envelope and no
    // internal detail.
    let app = common::build_test_app(common::lazy_pool());
    let token = auth_token(7, "manager");
    let response = get_authed(app, "/api/v1/campaigns", &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: every error body carries the { error, code } shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_envelope_has_error_and_code_fields() {
    let app = common::build_test_app(common::lazy_pool());
    let response = common::get(app, "/api/v1/campaigns").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json["code"].is_string());
}
