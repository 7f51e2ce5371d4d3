//! Repository for the `subscriptions` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tavolo_core::types::DbId;

use crate::models::subscription::Subscription;

/// Column list for `subscriptions` queries.
const COLUMNS: &str = "id, tenant_id, external_ref, plan, status, period_start, period_end, \
     billing_period, period_accurate, created_at, updated_at";

/// Input for [`SubscriptionRepo::upsert`]; everything the webhook
/// handler has already validated and derived.
#[derive(Debug, Clone)]
pub struct UpsertSubscription<'a> {
    pub tenant_id: DbId,
    pub external_ref: &'a str,
    pub plan: &'a str,
    pub status: &'a str,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub billing_period: &'a str,
    pub period_accurate: bool,
}

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Fetch a subscription by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a subscription keyed by its external reference,
    /// returning the stored row.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSubscription<'_>,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions \
                 (tenant_id, external_ref, plan, status, period_start, period_end, \
                  billing_period, period_accurate) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (external_ref) \
             DO UPDATE SET plan = EXCLUDED.plan, status = EXCLUDED.status, \
                 period_start = EXCLUDED.period_start, period_end = EXCLUDED.period_end, \
                 billing_period = EXCLUDED.billing_period, \
                 period_accurate = EXCLUDED.period_accurate, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.tenant_id)
            .bind(input.external_ref)
            .bind(input.plan)
            .bind(input.status)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.billing_period)
            .bind(input.period_accurate)
            .fetch_one(pool)
            .await
    }

    /// List all subscriptions in an invoice-generating status, oldest
    /// first. Used by the billing backfill.
    pub async fn list_billable(pool: &PgPool) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions \
             WHERE status IN ('active', 'paid') \
             ORDER BY id"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .fetch_all(pool)
            .await
    }
}
