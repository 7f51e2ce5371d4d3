//! Tenant entity model.

use serde::Serialize;
use sqlx::FromRow;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `tenants` table: the restaurant/business account that
/// owns campaigns, recipients, and provider configuration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub name: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub currency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
