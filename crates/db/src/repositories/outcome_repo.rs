//! Repository for the append-only `send_outcomes` table.

use sqlx::PgPool;
use tavolo_core::types::DbId;

use crate::models::send_outcome::{OutcomeStatus, SendOutcome};

/// Column list for `send_outcomes` queries.
const COLUMNS: &str = "id, campaign_id, recipient_id, channel, status, error, created_at";

pub struct OutcomeRepo;

impl OutcomeRepo {
    /// Append one delivery-attempt outcome, returning the generated id.
    ///
    /// Exactly one row is written per recipient per dispatch attempt;
    /// rows are never updated afterwards.
    pub async fn record(
        pool: &PgPool,
        campaign_id: DbId,
        recipient_id: Option<DbId>,
        channel: &str,
        status: OutcomeStatus,
        error: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO send_outcomes (campaign_id, recipient_id, channel, status, error) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(recipient_id)
        .bind(channel)
        .bind(status.as_str())
        .bind(error)
        .fetch_one(pool)
        .await
    }

    /// List a campaign's outcome rows, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SendOutcome>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM send_outcomes \
             WHERE campaign_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SendOutcome>(&query)
            .bind(campaign_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
