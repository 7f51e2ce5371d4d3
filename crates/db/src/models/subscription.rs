//! Subscription entity model and status enum.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavolo_core::error::CoreError;
use tavolo_core::types::{DbId, Timestamp};

/// A row from the `subscriptions` table.
///
/// `billing_period` and `period_accurate` are derived at webhook time
/// and stored alongside the raw bounds; nothing downstream reads the
/// accuracy flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub tenant_id: DbId,
    pub external_ref: String,
    pub plan: String,
    pub status: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub billing_period: String,
    pub period_accurate: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lifecycle status of a subscription, as reported by the billing
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    Active,
    Paid,
    PastDue,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paid => "paid",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
        }
    }

    /// Whether this status triggers invoice generation.
    pub fn is_billable(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Paid)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(SubscriptionStatus::Incomplete),
            "active" => Ok(SubscriptionStatus::Active),
            "paid" => Ok(SubscriptionStatus::Paid),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            other => Err(CoreError::Validation(format!(
                "Unknown subscription status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_and_paid_are_billable() {
        assert!(SubscriptionStatus::Active.is_billable());
        assert!(SubscriptionStatus::Paid.is_billable());
        assert!(!SubscriptionStatus::Incomplete.is_billable());
        assert!(!SubscriptionStatus::PastDue.is_billable());
        assert!(!SubscriptionStatus::Canceled.is_billable());
    }

    #[test]
    fn status_names_round_trip() {
        for status in [
            SubscriptionStatus::Incomplete,
            SubscriptionStatus::Active,
            SubscriptionStatus::Paid,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Canceled,
        ] {
            let parsed: SubscriptionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("trialing".parse::<SubscriptionStatus>().is_err());
    }
}
