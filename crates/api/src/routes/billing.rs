//! Route definitions for the `/billing` resource and its admin surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Routes mounted at `/billing`.
///
/// ```text
/// GET    /invoices               -> list_invoices
/// GET    /invoices/{id}          -> get_invoice
/// GET    /invoices/{id}/receipt  -> download_receipt (PDF)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(billing::list_invoices))
        .route("/invoices/{id}", get(billing::get_invoice))
        .route("/invoices/{id}/receipt", get(billing::download_receipt))
}

/// Routes mounted at `/admin/billing` (admin role required).
///
/// ```text
/// POST   /backfill-invoices  -> backfill
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/backfill-invoices", post(billing::backfill))
}
