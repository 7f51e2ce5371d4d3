//! Repository for the `provider_configs` table.

use sqlx::PgPool;
use tavolo_core::types::DbId;

use crate::models::provider_config::ProviderConfig;

/// Column list for `provider_configs` queries.
const COLUMNS: &str =
    "id, tenant_id, channel, provider, api_key, settings, is_active, created_at, updated_at";

pub struct ProviderConfigRepo;

impl ProviderConfigRepo {
    /// Fetch the single active integration for a tenant and channel.
    ///
    /// A partial unique index guarantees at most one active row per
    /// (tenant, channel) pair.
    pub async fn find_active(
        pool: &PgPool,
        tenant_id: DbId,
        channel: &str,
    ) -> Result<Option<ProviderConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM provider_configs \
             WHERE tenant_id = $1 AND channel = $2 AND is_active"
        );
        sqlx::query_as::<_, ProviderConfig>(&query)
            .bind(tenant_id)
            .bind(channel)
            .fetch_optional(pool)
            .await
    }
}
