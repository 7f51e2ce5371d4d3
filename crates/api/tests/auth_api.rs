//! Integration tests for authentication and authorization rejection
//! paths. None of these reach the database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{auth_token, body_json, get, get_authed, post_json};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Bearer token rejection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_authorization_header_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/campaigns").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].as_str().unwrap().contains("Authorization"));
}

#[tokio::test]
async fn malformed_authorization_scheme_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .uri("/api/v1/campaigns")
        .header("Authorization", "Token abc123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_bearer_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_authed(app, "/api/v1/campaigns", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn dispatch_requires_authentication() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(app, "/api/v1/campaigns/1/dispatch", &[], "{}").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn receipt_download_requires_authentication() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/billing/invoices/1/receipt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backfill_rejects_non_admin_roles() {
    let app = common::build_test_app(common::lazy_pool());
    let bearer = format!("Bearer {}", auth_token(7, "manager"));
    let response = post_json(
        app,
        "/api/v1/admin/billing/backfill-invoices",
        &[("Authorization", bearer.as_str())],
        "{}",
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn backfill_requires_authentication() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(app, "/api/v1/admin/billing/backfill-invoices", &[], "{}").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
