//! Repository for the `recipients` table, including audience resolution.

use sqlx::PgPool;
use tavolo_core::audience::AudienceFilter;
use tavolo_core::types::DbId;

use crate::models::recipient::Recipient;

/// Column list for `recipients` queries.
const COLUMNS: &str = "id, tenant_id, display_name, phone, email, push_token, points_balance, \
     last_visit_at, whatsapp_opt_in, sms_opt_in, email_opt_in, push_opt_in, \
     created_at, updated_at";

pub struct RecipientRepo;

impl RecipientRepo {
    /// Resolve a campaign's audience: the tenant's recipients matching
    /// the one active filter strategy.
    ///
    /// An empty result is returned as an empty vec, never an error; the
    /// caller decides whether an empty audience is fatal.
    pub async fn resolve_audience(
        pool: &PgPool,
        tenant_id: DbId,
        filter: &AudienceFilter,
    ) -> Result<Vec<Recipient>, sqlx::Error> {
        let rows = match filter {
            AudienceFilter::Tags { tag_ids } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM recipients \
                     WHERE tenant_id = $1 \
                       AND id IN (SELECT recipient_id FROM recipient_tags WHERE tag_id = ANY($2)) \
                     ORDER BY id"
                );
                sqlx::query_as::<_, Recipient>(&query)
                    .bind(tenant_id)
                    .bind(tag_ids)
                    .fetch_all(pool)
                    .await?
            }
            AudienceFilter::Recency { inactive_days } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM recipients \
                     WHERE tenant_id = $1 \
                       AND last_visit_at IS NOT NULL \
                       AND last_visit_at < NOW() - make_interval(days => $2::int) \
                     ORDER BY id"
                );
                sqlx::query_as::<_, Recipient>(&query)
                    .bind(tenant_id)
                    .bind(inactive_days)
                    .fetch_all(pool)
                    .await?
            }
            AudienceFilter::PointRange {
                min_points,
                max_points,
            } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM recipients \
                     WHERE tenant_id = $1 \
                       AND points_balance >= $2 \
                       AND ($3::int8 IS NULL OR points_balance <= $3) \
                     ORDER BY id"
                );
                sqlx::query_as::<_, Recipient>(&query)
                    .bind(tenant_id)
                    .bind(min_points)
                    .bind(*max_points)
                    .fetch_all(pool)
                    .await?
            }
        };

        tracing::debug!(tenant_id, count = rows.len(), "Resolved campaign audience");
        Ok(rows)
    }
}
