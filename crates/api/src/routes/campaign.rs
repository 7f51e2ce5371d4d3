//! Route definitions for the `/campaigns` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /               -> list_campaigns
/// GET    /{id}           -> get_campaign
/// POST   /{id}/dispatch  -> dispatch_campaign
/// GET    /{id}/outcomes  -> list_outcomes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaign::list_campaigns))
        .route("/{id}", get(campaign::get_campaign))
        .route("/{id}/dispatch", post(campaign::dispatch_campaign))
        .route("/{id}/outcomes", get(campaign::list_outcomes))
}
