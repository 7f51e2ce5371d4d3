//! Repository for the `campaigns` table.

use sqlx::PgPool;
use tavolo_core::types::DbId;

use crate::models::campaign::{Campaign, DispatchSummary};

/// Column list for `campaigns` queries.
const COLUMNS: &str = "id, tenant_id, name, channel, message_template, subject, variables, \
     audience_type, audience_filter, total_recipients, sent_count, failed_count, \
     skipped_count, last_dispatched_at, created_at, updated_at";

pub struct CampaignRepo;

impl CampaignRepo {
    /// Fetch a campaign by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's campaigns, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the campaign's derived dispatch summary.
    ///
    /// The counters are a summary of the latest run, not an accumulating
    /// total; every dispatch replaces them wholesale.
    pub async fn update_dispatch_summary(
        pool: &PgPool,
        campaign_id: DbId,
        summary: &DispatchSummary,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE campaigns \
             SET total_recipients = $2, sent_count = $3, failed_count = $4, \
                 skipped_count = $5, last_dispatched_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(campaign_id)
        .bind(summary.total)
        .bind(summary.sent)
        .bind(summary.failed)
        .bind(summary.skipped)
        .execute(pool)
        .await?;
        Ok(())
    }
}
