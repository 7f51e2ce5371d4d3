//! Repository for the `tenants` table.

use sqlx::PgPool;
use tavolo_core::types::DbId;

use crate::models::tenant::Tenant;

/// Column list for `tenants` queries.
const COLUMNS: &str =
    "id, name, contact_phone, contact_email, currency, created_at, updated_at";

pub struct TenantRepo;

impl TenantRepo {
    /// Fetch a tenant by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
