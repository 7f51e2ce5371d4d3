//! Campaign entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `campaigns` table.
///
/// `channel` and `audience_type` are stored as text and parsed into
/// their closed enums at the point of use; the dispatch counters are a
/// derived summary overwritten after every run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub channel: String,
    pub message_template: String,
    pub subject: Option<String>,
    pub variables: serde_json::Value,
    pub audience_type: String,
    pub audience_filter: serde_json::Value,
    pub total_recipients: i64,
    pub sent_count: i64,
    pub failed_count: i64,
    pub skipped_count: i64,
    pub last_dispatched_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Aggregate results of one dispatch run, written back to the campaign.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: i64,
    pub sent: i64,
    pub failed: i64,
    pub skipped: i64,
}
