//! Delivery outcome log model.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the append-only `send_outcomes` table: the result of one
/// delivery attempt for one recipient.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SendOutcome {
    pub id: DbId,
    pub campaign_id: DbId,
    /// NULL for test-mode sends (the synthetic recipient has no row).
    pub recipient_id: Option<DbId>,
    pub channel: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: Timestamp,
}

/// Status of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Sent,
    Failed,
    Skipped,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Sent => "sent",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
