use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analytics::series::DAYS_PER_WEEK;

/// Months are approximated as 30 days.
const DAYS_PER_MONTH: f64 = 30.0;

/// A daily rate restated per week and per month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RateBreakdown {
    pub per_day: Option<f64>,
    pub per_week: Option<f64>,
    pub per_month: Option<f64>,
}

pub fn rate_breakdown(rate: Option<f64>) -> RateBreakdown {
    match rate {
        Some(per_day) => RateBreakdown {
            per_day: Some(per_day),
            per_week: Some(per_day * DAYS_PER_WEEK as f64),
            per_month: Some(per_day * DAYS_PER_MONTH),
        },
        None => RateBreakdown::default(),
    }
}

/// Daily contribution needed to close `remaining` within `days`.
pub fn required_rate(remaining: f64, days: i64) -> Option<f64> {
    if days <= 0 {
        return None;
    }
    Some(remaining / days as f64)
}

/// Date on which `remaining` is reached at `rate` per day, counting from `today`.
///
/// A missing or non-positive rate means the goal is not achievable. A
/// fractional number of days rounds up to the next whole day.
pub fn estimate_completion(remaining: f64, rate: Option<f64>, today: NaiveDate) -> Option<NaiveDate> {
    let rate = rate.filter(|rate| *rate > 0.0)?;
    let days_needed = remaining / rate;
    if !days_needed.is_finite() {
        return None;
    }
    let whole_days = if days_needed.fract() == 0.0 {
        days_needed
    } else {
        days_needed.trunc() + 1.0
    };
    if whole_days >= 0.0 {
        today.checked_add_days(Days::new(whole_days as u64))
    } else {
        today.checked_sub_days(Days::new(whole_days.abs() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    #[test]
    fn breakdown_scales_daily_rate() {
        let breakdown = rate_breakdown(Some(2.0));
        assert_eq!(breakdown.per_day, Some(2.0));
        assert_eq!(breakdown.per_week, Some(14.0));
        assert_eq!(breakdown.per_month, Some(60.0));
        assert_eq!(rate_breakdown(None), RateBreakdown::default());
    }

    #[test]
    fn required_rate_needs_positive_budget() {
        assert_eq!(required_rate(300.0, 30), Some(10.0));
        assert_eq!(required_rate(300.0, 0), None);
        assert_eq!(required_rate(300.0, -4), None);
    }

    #[test]
    fn completion_rounds_partial_days_up() {
        let exact = estimate_completion(100.0, Some(10.0), today());
        assert_eq!(exact, NaiveDate::from_ymd_opt(2025, 8, 11));
        let partial = estimate_completion(101.0, Some(10.0), today());
        assert_eq!(partial, NaiveDate::from_ymd_opt(2025, 8, 12));
    }

    #[test]
    fn completion_unreachable_without_positive_rate() {
        assert_eq!(estimate_completion(100.0, None, today()), None);
        assert_eq!(estimate_completion(100.0, Some(-5.0), today()), None);
        assert_eq!(estimate_completion(100.0, Some(0.0), today()), None);
        assert_eq!(estimate_completion(0.0, Some(3.0), today()), Some(today()));
    }

    #[test]
    fn completion_beyond_calendar_is_unknown() {
        assert_eq!(estimate_completion(f64::MAX, Some(1e-300), today()), None);
        assert_eq!(estimate_completion(1e300, Some(1.0), today()), None);
    }
}
