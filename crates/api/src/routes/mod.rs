pub mod billing;
pub mod campaign;
pub mod health;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns                               list (auth)
/// /campaigns/{id}                          get (auth)
/// /campaigns/{id}/dispatch                 run dispatch (POST, auth)
/// /campaigns/{id}/outcomes                 outcome rows (auth)
///
/// /billing/invoices                        list (auth)
/// /billing/invoices/{id}                   invoice + line items (auth)
/// /billing/invoices/{id}/receipt           PDF attachment (auth)
///
/// /webhooks/subscriptions                  subscription event (POST, HMAC)
///
/// /admin/billing/backfill-invoices         backfill (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Campaign dispatch and outcome log.
        .nest("/campaigns", campaign::router())
        // Tenant-facing invoices and receipts.
        .nest("/billing", billing::router())
        // Billing collaborator webhook (HMAC-signed, no bearer auth).
        .nest("/webhooks", webhooks::router())
        // Admin maintenance surface.
        .nest("/admin/billing", billing::admin_router())
}
