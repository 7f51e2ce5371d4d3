//! Route definitions for inbound webhooks.
//!
//! Webhook endpoints authenticate via HMAC body signature, not bearer
//! tokens.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST   /subscriptions  -> subscription_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/subscriptions", post(webhook::subscription_webhook))
}
