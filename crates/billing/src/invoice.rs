//! Idempotent invoice generation.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tavolo_core::error::CoreError;
use tavolo_core::plans::Plan;
use tavolo_core::types::DbId;
use tavolo_db::models::subscription::{Subscription, SubscriptionStatus};
use tavolo_db::repositories::invoice_repo::UpsertInvoice;
use tavolo_db::repositories::{InvoiceRepo, TenantRepo};

use crate::error::BillingError;

/// Deterministic invoice number for a subscription period.
///
/// Derived purely from (subscription, period start) so regeneration for
/// the same period always produces the same number.
pub fn invoice_number(subscription_id: DbId, period_start: NaiveDate) -> String {
    format!(
        "INV-{:06}-{}",
        subscription_id,
        period_start.format("%Y%m")
    )
}

/// Generate (or refresh) the invoice for a subscription's current
/// period, returning the invoice id.
///
/// The insert lands on the per-period uniqueness constraint, so calling
/// this twice for the same subscription and period yields exactly one
/// invoice row; the second call only updates status and paid_at. The
/// plan line item is inserted alongside and no-ops on conflict.
pub async fn generate_invoice(
    pool: &PgPool,
    subscription: &Subscription,
) -> Result<DbId, BillingError> {
    let plan: Plan = subscription.plan.parse()?;
    let status: SubscriptionStatus = subscription.status.parse()?;

    let tenant = TenantRepo::find_by_id(pool, subscription.tenant_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Tenant",
            id: subscription.tenant_id,
        })?;

    let number = invoice_number(subscription.id, subscription.period_start);
    let (invoice_status, paid_at) = match status {
        SubscriptionStatus::Paid => ("paid", Some(Utc::now())),
        _ => ("pending", None),
    };

    let invoice_id = InvoiceRepo::upsert_for_period(
        pool,
        &UpsertInvoice {
            subscription_id: subscription.id,
            tenant_id: subscription.tenant_id,
            invoice_number: &number,
            period_start: subscription.period_start,
            period_end: subscription.period_end,
            amount_cents: plan.price_cents(),
            currency: &tenant.currency,
            status: invoice_status,
            paid_at,
        },
    )
    .await?;

    InvoiceRepo::insert_line_item(
        pool,
        invoice_id,
        plan.description(),
        1,
        plan.price_cents(),
        plan.price_cents(),
    )
    .await?;

    tracing::info!(
        invoice_id,
        subscription_id = subscription.id,
        number,
        status = invoice_status,
        "Invoice generated"
    );

    Ok(invoice_id)
}
