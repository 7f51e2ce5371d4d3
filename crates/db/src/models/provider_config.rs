//! Delivery provider configuration model.

use serde::Serialize;
use sqlx::FromRow;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `provider_configs` table: per-tenant, per-channel
/// credentials and settings for a third-party delivery integration.
/// At most one active row exists per (tenant, channel).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderConfig {
    pub id: DbId,
    pub tenant_id: DbId,
    pub channel: String,
    pub provider: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProviderConfig {
    /// Look up a string field in the provider-specific settings document.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }
}
