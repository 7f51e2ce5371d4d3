//! Billing-period arithmetic.
//!
//! Subscription webhooks may omit the period end; the plan's calendar
//! length fills it in. Day-of-month is clamped by [`chrono::Months`]
//! addition, so Jan 31 plus one month lands on the last day of February.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::CoreError;
use crate::plans::Plan;

/// Default the period end from the plan's calendar length.
pub fn default_period_end(plan: Plan, period_start: NaiveDate) -> Result<NaiveDate, CoreError> {
    period_start
        .checked_add_months(Months::new(plan.period_months()))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Period start {period_start} is out of calendar range"
            ))
        })
}

/// Whether the reported duration falls inside the plan's tolerance band.
pub fn period_is_accurate(plan: Plan, start: NaiveDate, end: NaiveDate) -> bool {
    let days = (end - start).num_days();
    plan.expected_days().contains(&days)
}

/// Human-readable billing-period string.
///
/// A period spanning exactly one calendar month (first to first) renders
/// as `"August 2026"`; anything else renders both bounds,
/// `"Aug 15, 2026 to Sep 15, 2026"`.
pub fn billing_period_label(start: NaiveDate, end: NaiveDate) -> String {
    let one_month_later = start.checked_add_months(Months::new(1));
    if start.day() == 1 && one_month_later == Some(end) {
        return start.format("%B %Y").to_string();
    }
    format!(
        "{} to {}",
        start.format("%b %-d, %Y"),
        end.format("%b %-d, %Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_monthly_period_end() {
        let end = default_period_end(Plan::Monthly, date(2026, 8, 1)).unwrap();
        assert_eq!(end, date(2026, 9, 1));
    }

    #[test]
    fn clamps_day_of_month_when_defaulting() {
        let end = default_period_end(Plan::Monthly, date(2026, 1, 31)).unwrap();
        assert_eq!(end, date(2026, 2, 28));
    }

    #[test]
    fn defaults_annual_period_end() {
        let end = default_period_end(Plan::Annual, date(2026, 3, 15)).unwrap();
        assert_eq!(end, date(2027, 3, 15));
    }

    #[test]
    fn exact_calendar_month_collapses_to_month_name() {
        let label = billing_period_label(date(2026, 8, 1), date(2026, 9, 1));
        assert_eq!(label, "August 2026");
    }

    #[test]
    fn mid_month_period_renders_both_bounds() {
        let label = billing_period_label(date(2026, 8, 15), date(2026, 9, 15));
        assert_eq!(label, "Aug 15, 2026 to Sep 15, 2026");
    }

    #[test]
    fn accurate_flag_tracks_tolerance_band() {
        assert!(period_is_accurate(
            Plan::Monthly,
            date(2026, 8, 1),
            date(2026, 9, 1)
        ));
        // A 61-day "monthly" period is outside the band.
        assert!(!period_is_accurate(
            Plan::Monthly,
            date(2026, 8, 1),
            date(2026, 10, 1)
        ));
        assert!(period_is_accurate(
            Plan::Annual,
            date(2026, 1, 1),
            date(2027, 1, 1)
        ));
    }
}
