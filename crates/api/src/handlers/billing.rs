//! Handlers for the `/billing` resource: invoice listings and PDF
//! receipt downloads, plus the admin backfill.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tavolo_billing::{backfill_invoices, render_receipt, ReceiptData};
use tavolo_core::error::CoreError;
use tavolo_core::plans::Plan;
use tavolo_core::types::DbId;
use tavolo_db::models::invoice::Invoice;
use tavolo_db::repositories::{InvoiceRepo, SubscriptionRepo, TenantRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::campaign::PageQuery;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that an invoice exists and belongs to the caller's tenant.
async fn ensure_invoice_owned(
    pool: &sqlx::PgPool,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Invoice> {
    let invoice = InvoiceRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    if invoice.tenant_id != auth.tenant_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invoice belongs to another tenant".into(),
        )));
    }
    Ok(invoice)
}

/// GET /api/v1/billing/invoices
///
/// List the tenant's invoices, newest first.
pub async fn list_invoices(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<DataResponse<Vec<Invoice>>>> {
    let (limit, offset) = params.clamp();
    let invoices = InvoiceRepo::list_for_tenant(&state.pool, auth.tenant_id, limit, offset).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// GET /api/v1/billing/invoices/{id}
///
/// Fetch one invoice with its line items.
pub async fn get_invoice(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let invoice = ensure_invoice_owned(&state.pool, &auth, invoice_id).await?;
    let line_items = InvoiceRepo::list_line_items(&state.pool, invoice.id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "invoice": invoice,
            "line_items": line_items,
        }
    })))
}

/// GET /api/v1/billing/invoices/{id}/receipt
///
/// Render the invoice as a PDF and return it as an attachment.
pub async fn download_receipt(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let invoice = ensure_invoice_owned(&state.pool, &auth, invoice_id).await?;
    let line_items = InvoiceRepo::list_line_items(&state.pool, invoice.id).await?;

    let tenant = TenantRepo::find_by_id(&state.pool, invoice.tenant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tenant",
            id: invoice.tenant_id,
        }))?;
    let subscription = SubscriptionRepo::find_by_id(&state.pool, invoice.subscription_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id: invoice.subscription_id,
        }))?;
    let plan: Plan = subscription.plan.parse()?;

    let filename = format!("receipt-{}.pdf", invoice.invoice_number);
    let data = ReceiptData {
        invoice,
        line_items,
        tenant_name: tenant.name,
        contact_email: tenant.contact_email,
        plan_description: plan.description().to_string(),
    };
    let bytes = render_receipt(&data)?;

    tracing::info!(invoice_id, bytes = bytes.len(), "Receipt rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// POST /api/v1/admin/billing/backfill-invoices
///
/// Regenerate invoices for every billable subscription. Per-row
/// failures are logged and counted, never fatal. Admin only.
pub async fn backfill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let summary = backfill_invoices(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": summary })))
}
