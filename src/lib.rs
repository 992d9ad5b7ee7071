#![doc(test(attr(deny(warnings))))]

//! Savings Pace infers how fast a personal or group savings account is
//! growing from its ledger of dated movements, and projects that velocity
//! onto each savings goal as an ETA and a required daily pace.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod time;
pub mod utils;

pub use analytics::{
    analyze, estimate_completion, estimate_rate, rate_breakdown, required_rate, AccountOverview,
    GoalAnalytics, GoalAnalyzer, RateBreakdown, RateEstimator,
};
pub use errors::{AnalyticsError, AnalyticsResult};
pub use time::{Clock, FixedClock, SystemClock};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Savings Pace tracing initialized.");
    });
}
