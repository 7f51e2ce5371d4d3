//! Subscription webhook application and invoice backfill.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tavolo_core::billing::{billing_period_label, default_period_end, period_is_accurate};
use tavolo_core::error::CoreError;
use tavolo_core::plans::Plan;
use tavolo_core::types::DbId;
use tavolo_db::models::subscription::SubscriptionStatus;
use tavolo_db::repositories::subscription_repo::UpsertSubscription;
use tavolo_db::repositories::{SubscriptionRepo, TenantRepo};
use validator::Validate;

use crate::error::BillingError;
use crate::invoice::generate_invoice;

/// A subscription lifecycle event reported by the billing collaborator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubscriptionEvent {
    pub tenant_id: DbId,
    /// The collaborator's subscription identifier; upserts key on this.
    #[validate(length(min = 1, max = 128))]
    pub external_ref: String,
    pub plan: String,
    pub status: String,
    pub period_start: NaiveDate,
    /// Defaulted from the plan's calendar length when omitted.
    pub period_end: Option<NaiveDate>,
}

/// The structured result document returned to the webhook caller.
#[derive(Debug, Serialize)]
pub struct SubscriptionEventResult {
    pub subscription_id: DbId,
    /// Present when the event's status triggered invoice generation.
    pub invoice_id: Option<DbId>,
    pub billing_period: String,
    /// Whether the period duration fell inside the plan's tolerance
    /// band. Surfaced to the caller only; nothing downstream reads it.
    pub period_accurate: bool,
}

/// Apply one subscription event: validate, derive the billing period,
/// upsert the subscription, and generate the period invoice for
/// billable statuses.
///
/// Invalid enum values are hard failures here; the webhook caller gets
/// a validation error rather than a partial write.
pub async fn apply_subscription_event(
    pool: &PgPool,
    event: &SubscriptionEvent,
) -> Result<SubscriptionEventResult, BillingError> {
    event
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let plan: Plan = event.plan.parse()?;
    let status: SubscriptionStatus = event.status.parse()?;

    TenantRepo::find_by_id(pool, event.tenant_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Tenant",
            id: event.tenant_id,
        })?;

    let period_end = match event.period_end {
        Some(end) => end,
        None => default_period_end(plan, event.period_start)?,
    };
    if period_end <= event.period_start {
        return Err(CoreError::Validation(format!(
            "Period end {period_end} is not after period start {}",
            event.period_start
        ))
        .into());
    }

    let billing_period = billing_period_label(event.period_start, period_end);
    let period_accurate = period_is_accurate(plan, event.period_start, period_end);

    let subscription = SubscriptionRepo::upsert(
        pool,
        &UpsertSubscription {
            tenant_id: event.tenant_id,
            external_ref: &event.external_ref,
            plan: plan.as_str(),
            status: status.as_str(),
            period_start: event.period_start,
            period_end,
            billing_period: &billing_period,
            period_accurate,
        },
    )
    .await?;

    let invoice_id = if status.is_billable() {
        Some(generate_invoice(pool, &subscription).await?)
    } else {
        None
    };

    tracing::info!(
        subscription_id = subscription.id,
        tenant_id = event.tenant_id,
        %plan,
        %status,
        period_accurate,
        "Applied subscription event"
    );

    Ok(SubscriptionEventResult {
        subscription_id: subscription.id,
        invoice_id,
        billing_period,
        period_accurate,
    })
}

/// Summary of one backfill run.
#[derive(Debug, Default, Serialize)]
pub struct BackfillSummary {
    pub processed: u64,
    pub generated: u64,
    pub failed: u64,
}

/// Regenerate invoices for every subscription in a billable status.
///
/// Unlike the live webhook path, per-subscription failures here are
/// logged and skipped so one bad row cannot stall the sweep.
pub async fn backfill_invoices(pool: &PgPool) -> Result<BackfillSummary, BillingError> {
    let subscriptions = SubscriptionRepo::list_billable(pool).await?;
    let mut summary = BackfillSummary::default();

    for subscription in subscriptions {
        summary.processed += 1;
        match generate_invoice(pool, &subscription).await {
            Ok(invoice_id) => {
                summary.generated += 1;
                tracing::debug!(
                    subscription_id = subscription.id,
                    invoice_id,
                    "Backfilled invoice"
                );
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(
                    subscription_id = subscription.id,
                    error = %e,
                    "Invoice backfill failed for subscription, continuing"
                );
            }
        }
    }

    tracing::info!(
        processed = summary.processed,
        generated = summary.generated,
        failed = summary.failed,
        "Invoice backfill complete"
    );
    Ok(summary)
}
