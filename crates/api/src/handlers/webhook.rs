//! Handler for the billing subscription webhook.
//!
//! The caller is the billing collaborator, not a tenant user, so the
//! request authenticates with an HMAC body signature instead of a
//! bearer token.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tavolo_billing::{apply_subscription_event, SubscriptionEvent};
use tavolo_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::webhook::{verify, SIGNATURE_HEADER};

/// POST /api/v1/webhooks/subscriptions
///
/// Apply a subscription lifecycle event and return the structured
/// result document (subscription id, invoice id, billing period,
/// accuracy flag).
pub async fn subscription_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing webhook signature header".into(),
            ))
        })?;

    if !verify(&state.config.webhook_secret, &body, signature) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }

    let event: SubscriptionEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    let result = apply_subscription_event(&state.pool, &event).await?;

    Ok(Json(serde_json::json!({ "data": result })))
}
