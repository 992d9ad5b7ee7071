//! Net savings velocity (currency per day) inferred from a movement ledger.
//!
//! Two interchangeable strategies sit behind [`DailySeriesAnalyzer`]:
//!
//! * [`StatisticalAnalyzer`] anchors its lookback window at the latest
//!   movement and tries, in order, the median of complete weekly totals, the
//!   least-squares slope of the cumulative balance, and the plain daily mean.
//! * [`BucketMeanAnalyzer`] anchors its window at the clock's today and
//!   averages the days that actually saw movements.
//!
//! The two anchors differ on purpose: a stale ledger still yields a rate from
//! its last active stretch under the statistical strategy, while the bucket
//! strategy widens to the whole history once nothing recent remains.

use std::sync::Arc;

use chrono::Days;
use tracing::{debug, trace};

use crate::analytics::series::{
    daily_buckets, least_squares_slope, mean, median, DailySeries, DAYS_PER_WEEK,
};
use crate::config::{AnalyticsConfig, EstimatorKind};
use crate::domain::Movement;
use crate::time::Clock;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_MIN_SLOPE_POINTS: usize = 5;

/// Strategy that turns movements into a single daily rate.
pub trait DailySeriesAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when the movements do not support any estimate.
    fn estimate(&self, movements: &[Movement], lookback_days: u32) -> Option<f64>;
}

/// Three-tier estimator over a zero-filled daily series.
#[derive(Debug, Clone, Copy)]
pub struct StatisticalAnalyzer {
    min_slope_points: usize,
}

impl StatisticalAnalyzer {
    pub fn new(min_slope_points: usize) -> Self {
        Self { min_slope_points }
    }

    fn weekly_median(&self, window: &DailySeries) -> Option<f64> {
        let weeks = window.complete_week_totals();
        trace!(weeks = weeks.len(), "weekly totals in window");
        median(&weeks).map(|weekly| weekly / DAYS_PER_WEEK as f64)
    }

    fn cumulative_slope(&self, window: &DailySeries) -> Option<f64> {
        let cumulative = window.cumulative();
        if cumulative.len() < self.min_slope_points {
            return None;
        }
        let offsets: Vec<f64> = (0..cumulative.len()).map(|day| day as f64).collect();
        least_squares_slope(&offsets, &cumulative)
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SLOPE_POINTS)
    }
}

impl DailySeriesAnalyzer for StatisticalAnalyzer {
    fn name(&self) -> &'static str {
        "statistical"
    }

    fn estimate(&self, movements: &[Movement], lookback_days: u32) -> Option<f64> {
        if movements.is_empty() {
            return None;
        }
        let series = DailySeries::from_buckets(&daily_buckets(movements))?;
        let cutoff = series
            .end()
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(series.start());
        let window = series.since(cutoff).unwrap_or_else(|| series.clone());
        trace!(days = window.len(), start = %window.start(), "lookback window");

        let tiers: [(&str, Option<f64>); 3] = [
            ("weekly_median", self.weekly_median(&window)),
            ("cumulative_slope", self.cumulative_slope(&window)),
            ("daily_mean", window.mean()),
        ];
        tiers
            .into_iter()
            .find_map(|(tier, candidate)| {
                candidate.filter(|rate| rate.is_finite()).map(|rate| {
                    debug!(tier, rate, "estimated daily rate");
                    rate
                })
            })
    }
}

/// Mean of sparse day buckets inside a window anchored at today.
#[derive(Clone)]
pub struct BucketMeanAnalyzer {
    clock: Arc<dyn Clock>,
}

impl BucketMeanAnalyzer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl DailySeriesAnalyzer for BucketMeanAnalyzer {
    fn name(&self) -> &'static str {
        "bucket_mean"
    }

    fn estimate(&self, movements: &[Movement], lookback_days: u32) -> Option<f64> {
        let buckets = daily_buckets(movements);
        if buckets.is_empty() {
            return None;
        }
        let today = self.clock.today();
        let recent: Vec<f64> = match today.checked_sub_days(Days::new(u64::from(lookback_days))) {
            Some(cutoff) => buckets.range(cutoff..).map(|(_, total)| *total).collect(),
            None => buckets.values().copied().collect(),
        };
        let totals = if recent.is_empty() {
            debug!("no buckets inside lookback window; using full history");
            buckets.values().copied().collect()
        } else {
            recent
        };
        let rate = mean(&totals)?;
        debug!(buckets = totals.len(), rate, "estimated daily rate from buckets");
        Some(rate)
    }
}

/// Configured estimator: one strategy plus its lookback window.
pub struct RateEstimator {
    analyzer: Box<dyn DailySeriesAnalyzer>,
    lookback_days: u32,
}

impl RateEstimator {
    pub fn new(analyzer: Box<dyn DailySeriesAnalyzer>, lookback_days: u32) -> Self {
        Self {
            analyzer,
            lookback_days,
        }
    }

    pub fn from_config(config: &AnalyticsConfig, clock: Arc<dyn Clock>) -> Self {
        let analyzer: Box<dyn DailySeriesAnalyzer> = match config.estimator {
            EstimatorKind::Statistical => {
                Box::new(StatisticalAnalyzer::new(config.min_slope_points))
            }
            EstimatorKind::BucketMean => Box::new(BucketMeanAnalyzer::new(clock)),
        };
        Self::new(analyzer, config.lookback_days)
    }

    pub fn strategy(&self) -> &'static str {
        self.analyzer.name()
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn estimate(&self, movements: &[Movement]) -> Option<f64> {
        self.analyzer.estimate(movements, self.lookback_days)
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new(Box::<StatisticalAnalyzer>::default(), DEFAULT_LOOKBACK_DAYS)
    }
}

/// Estimates the daily rate with the statistical strategy.
pub fn estimate_rate(movements: &[Movement], lookback_days: u32) -> Option<f64> {
    StatisticalAnalyzer::default().estimate(movements, lookback_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(10, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(start: NaiveDate, amounts: &[f64]) -> Vec<Movement> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                Movement::transaction(at(start + Days::new(i as u64)), *amount, format!("m{i}"))
            })
            .collect()
    }

    #[test]
    fn empty_ledger_has_no_rate() {
        assert_eq!(estimate_rate(&[], 90), None);
        let clock = Arc::new(FixedClock::on(date(2025, 5, 1)));
        assert_eq!(BucketMeanAnalyzer::new(clock).estimate(&[], 90), None);
    }

    #[test]
    fn single_day_rate_is_that_days_total() {
        let movements = vec![
            Movement::transaction(at(date(2025, 5, 7)), 40.0, "a"),
            Movement::transaction(at(date(2025, 5, 7)), -15.0, "b"),
        ];
        assert_eq!(estimate_rate(&movements, 90), Some(25.0));
    }

    #[test]
    fn weekly_median_resists_outlier_day() {
        // Three full weeks starting Monday 2025-05-05 at 10/day, one 700 payout.
        let mut amounts = vec![10.0; 21];
        amounts[10] += 700.0;
        let movements = daily(date(2025, 5, 5), &amounts);
        assert_eq!(estimate_rate(&movements, 90), Some(10.0));
    }

    #[test]
    fn slope_used_when_no_complete_week() {
        // Wednesday to Monday: six days, no full Monday-Sunday week.
        let movements = daily(date(2025, 5, 7), &[12.0; 6]);
        let rate = estimate_rate(&movements, 90).unwrap();
        assert!((rate - 12.0).abs() < 1e-9, "rate was {rate}");
    }

    #[test]
    fn slope_tier_starts_at_min_slope_points() {
        // Tuesday starts: neither window holds a full Monday-Sunday week.
        // A flat cumulative series has slope 0 while its daily mean is not 0.
        let five_days = daily(date(2025, 5, 6), &[4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(estimate_rate(&five_days, 90), Some(0.0));

        let four_days = daily(date(2025, 5, 6), &[4.0, 0.0, 0.0, 0.0]);
        assert_eq!(estimate_rate(&four_days, 90), Some(1.0));

        let relaxed = StatisticalAnalyzer::new(4);
        assert_eq!(relaxed.estimate(&four_days, 90), Some(0.0));
    }

    #[test]
    fn mean_used_when_too_few_points_for_slope() {
        let movements = daily(date(2025, 5, 7), &[4.0, 0.0, 8.0]);
        assert_eq!(estimate_rate(&movements, 90), Some(4.0));
    }

    #[test]
    fn lookback_anchors_at_latest_movement() {
        // Two full weeks of 6/day ending Sunday 2025-05-18, plus one old deposit.
        let mut movements = daily(date(2024, 1, 1), &[1000.0]);
        movements.extend(daily(date(2025, 5, 5), &[6.0; 14]));
        assert_eq!(estimate_rate(&movements, 13), Some(6.0));
        // A window reaching back over the idle months is dominated by empty weeks.
        assert_eq!(estimate_rate(&movements, 365), Some(0.0));
    }

    #[test]
    fn bucket_mean_window_anchors_at_today() {
        let movements = vec![
            Movement::transaction(at(date(2025, 1, 10)), 100.0, "old"),
            Movement::transaction(at(date(2025, 4, 20)), 30.0, "recent-a"),
            Movement::transaction(at(date(2025, 4, 28)), 10.0, "recent-b"),
        ];
        let clock = Arc::new(FixedClock::on(date(2025, 5, 1)));
        let analyzer = BucketMeanAnalyzer::new(clock);
        assert_eq!(analyzer.estimate(&movements, 30), Some(20.0));
    }

    #[test]
    fn bucket_mean_widens_to_full_history_when_window_empty() {
        let movements = vec![
            Movement::transaction(at(date(2024, 1, 10)), 100.0, "a"),
            Movement::transaction(at(date(2024, 1, 11)), 50.0, "b"),
        ];
        let clock = Arc::new(FixedClock::on(date(2025, 5, 1)));
        let analyzer = BucketMeanAnalyzer::new(clock);
        assert_eq!(analyzer.estimate(&movements, 30), Some(75.0));
        // The statistical path still anchors at the last movement instead.
        assert_eq!(estimate_rate(&movements, 30), Some(75.0));
    }

    #[test]
    fn bucket_mean_ignores_empty_days() {
        let movements = vec![
            Movement::transaction(at(date(2025, 4, 1)), 10.0, "a"),
            Movement::transaction(at(date(2025, 4, 5)), 20.0, "b"),
        ];
        let clock = Arc::new(FixedClock::on(date(2025, 4, 6)));
        let bucketed = BucketMeanAnalyzer::new(clock).estimate(&movements, 90);
        assert_eq!(bucketed, Some(15.0));
        // Zero-filled: cumulative 10,10,10,10,30 has a slope of 4.
        assert_eq!(estimate_rate(&movements, 90), Some(4.0));
    }

    #[test]
    fn estimator_follows_configured_strategy() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(date(2025, 4, 6)));
        let config = AnalyticsConfig {
            estimator: EstimatorKind::BucketMean,
            ..AnalyticsConfig::default()
        };
        let estimator = RateEstimator::from_config(&config, clock);
        assert_eq!(estimator.strategy(), "bucket_mean");
        assert_eq!(estimator.lookback_days(), 90);
        assert_eq!(RateEstimator::default().strategy(), "statistical");
    }
}
