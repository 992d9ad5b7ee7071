//! Savings-rate analytics: estimation, projection and per-goal aggregation.

pub mod aggregator;
pub mod estimator;
pub mod projection;
pub mod series;

pub use aggregator::{analyze, AccountOverview, GoalAnalytics, GoalAnalyzer};
pub use estimator::{
    estimate_rate, BucketMeanAnalyzer, DailySeriesAnalyzer, RateEstimator, StatisticalAnalyzer,
};
pub use projection::{estimate_completion, rate_breakdown, required_rate, RateBreakdown};
