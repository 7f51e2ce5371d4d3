//! Subscription plan catalogue.
//!
//! A static lookup table: each plan maps to a fixed price, a line-item
//! description, a calendar length, and the tolerance band used when
//! judging whether reported period bounds look right for the plan.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Monthly,
    Semiannual,
    Annual,
}

impl Plan {
    /// Every plan on offer.
    pub const ALL: [Plan; 3] = [Plan::Monthly, Plan::Semiannual, Plan::Annual];

    /// The canonical lowercase name stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Monthly => "monthly",
            Plan::Semiannual => "semiannual",
            Plan::Annual => "annual",
        }
    }

    /// Fixed plan price in integer cents.
    pub fn price_cents(&self) -> i64 {
        match self {
            Plan::Monthly => 29_900,
            Plan::Semiannual => 149_900,
            Plan::Annual => 299_900,
        }
    }

    /// Invoice line-item description.
    pub fn description(&self) -> &'static str {
        match self {
            Plan::Monthly => "Tavolo loyalty platform, monthly subscription",
            Plan::Semiannual => "Tavolo loyalty platform, semiannual subscription",
            Plan::Annual => "Tavolo loyalty platform, annual subscription",
        }
    }

    /// Calendar length of one billing period.
    pub fn period_months(&self) -> u32 {
        match self {
            Plan::Monthly => 1,
            Plan::Semiannual => 6,
            Plan::Annual => 12,
        }
    }

    /// Expected period duration in days, inclusive.
    ///
    /// Reported bounds whose duration falls outside this band get
    /// `period_accurate = false` on the subscription row.
    pub fn expected_days(&self) -> RangeInclusive<i64> {
        match self {
            Plan::Monthly => 27..=32,
            Plan::Semiannual => 175..=190,
            Plan::Annual => 360..=370,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Plan::Monthly),
            "semiannual" => Ok(Plan::Semiannual),
            "annual" => Ok(Plan::Annual),
            other => Err(CoreError::Validation(format!("Unknown plan: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_plan_name() {
        for plan in Plan::ALL {
            let parsed: Plan = plan.as_str().parse().unwrap();
            assert_eq!(parsed, plan);
        }
    }

    #[test]
    fn rejects_unknown_plan() {
        let err = "weekly".parse::<Plan>().unwrap_err();
        assert!(err.to_string().contains("Unknown plan"));
    }

    #[test]
    fn monthly_plan_prices_at_299() {
        assert_eq!(Plan::Monthly.price_cents(), 29_900);
    }

    #[test]
    fn tolerance_bands_cover_calendar_lengths() {
        assert!(Plan::Monthly.expected_days().contains(&31));
        assert!(Plan::Semiannual.expected_days().contains(&184));
        assert!(Plan::Annual.expected_days().contains(&365));
        assert!(!Plan::Monthly.expected_days().contains(&60));
    }
}
