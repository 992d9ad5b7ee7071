//! Per-goal and per-account analytics bundles.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analytics::estimator::RateEstimator;
use crate::analytics::projection::{
    estimate_completion, rate_breakdown, required_rate, RateBreakdown,
};
use crate::config::AnalyticsConfig;
use crate::domain::{AccountRef, Goal, Movement};
use crate::errors::AnalyticsResult;
use crate::ledger::{movements_for, LedgerSource};
use crate::time::{midnight_utc, Clock, FixedClock};

/// Derived view of one goal. Recomputed on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalAnalytics {
    pub remaining: f64,
    pub rate_per_day: Option<f64>,
    pub rate_per_week: Option<f64>,
    pub rate_per_month: Option<f64>,
    /// Midnight UTC of the projected completion date, in epoch seconds.
    pub eta_ts: Option<i64>,
    pub required_daily_pace: Option<f64>,
    /// Balance relative to target; may exceed 100.
    pub progress_percent: f64,
}

impl GoalAnalytics {
    pub fn eta(&self) -> Option<NaiveDate> {
        self.eta_ts
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .map(|instant| instant.date_naive())
    }
}

/// Account-wide summary plus the per-goal results it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountOverview {
    pub account: AccountRef,
    pub balance: f64,
    pub rate: RateBreakdown,
    pub goal_count: usize,
    pub total_remaining: f64,
    pub earliest_eta_ts: Option<i64>,
    pub goals: BTreeMap<Uuid, GoalAnalytics>,
}

/// Combines the rate estimator and projections for every goal of an account.
pub struct GoalAnalyzer {
    config: AnalyticsConfig,
    clock: Arc<dyn Clock>,
    estimator: RateEstimator,
}

impl GoalAnalyzer {
    pub fn new(config: AnalyticsConfig, clock: Arc<dyn Clock>) -> Self {
        let estimator = RateEstimator::from_config(&config, Arc::clone(&clock));
        Self {
            config,
            clock,
            estimator,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn estimator(&self) -> &RateEstimator {
        &self.estimator
    }

    /// Days available to reach a goal: until its deadline (at least one), or the default horizon.
    pub fn planning_horizon(&self, goal: &Goal, today: NaiveDate) -> i64 {
        match goal.deadline {
            Some(deadline) => (deadline - today).num_days().max(1),
            None => i64::from(self.config.default_horizon_days),
        }
    }

    /// Analyses `goals` against one account's balance and movement history.
    ///
    /// The rate is estimated once from the full ledger and shared by all goals.
    pub fn analyze(
        &self,
        balance: f64,
        goals: &[Goal],
        movements: &[Movement],
    ) -> BTreeMap<Uuid, GoalAnalytics> {
        let rate = self.account_rate(movements);
        self.project_goals(balance, goals, rate)
    }

    /// Fetches balance, goals and history of `account` and analyses them together.
    pub fn analyze_account(
        &self,
        source: &dyn LedgerSource,
        account: AccountRef,
    ) -> AnalyticsResult<AccountOverview> {
        let balance = source.balance(account)?;
        let goals = source.goals(account)?;
        let movements = movements_for(source, account, self.clock.as_ref())?;
        let rate = self.account_rate(&movements);
        let results = self.project_goals(balance, &goals, rate);

        let total_remaining = results.values().map(|r| r.remaining).sum();
        let earliest_eta_ts = results.values().filter_map(|r| r.eta_ts).min();

        info!(%account, goals = results.len(), "account analysed");
        Ok(AccountOverview {
            account,
            balance,
            rate: rate_breakdown(rate),
            goal_count: results.len(),
            total_remaining,
            earliest_eta_ts,
            goals: results,
        })
    }

    fn account_rate(&self, movements: &[Movement]) -> Option<f64> {
        let rate = self.estimator.estimate(movements);
        debug!(
            strategy = self.estimator.strategy(),
            movements = movements.len(),
            rate = ?rate,
            "account rate estimated"
        );
        rate
    }

    fn project_goals(
        &self,
        balance: f64,
        goals: &[Goal],
        rate: Option<f64>,
    ) -> BTreeMap<Uuid, GoalAnalytics> {
        let today = self.clock.today();
        let breakdown = rate_breakdown(rate);

        goals
            .iter()
            .map(|goal| {
                let remaining = (goal.target_amount - balance).max(0.0);
                let days = self.planning_horizon(goal, today);
                let eta = estimate_completion(remaining, rate, today);
                let progress_percent = if goal.target_amount > 0.0 {
                    balance / goal.target_amount * 100.0
                } else {
                    0.0
                };
                let analytics = GoalAnalytics {
                    remaining,
                    rate_per_day: breakdown.per_day,
                    rate_per_week: breakdown.per_week,
                    rate_per_month: breakdown.per_month,
                    eta_ts: eta.map(|date| midnight_utc(date).timestamp()),
                    required_daily_pace: required_rate(remaining, days),
                    progress_percent,
                };
                (goal.id, analytics)
            })
            .collect()
    }

    pub fn analyze_user(
        &self,
        source: &dyn LedgerSource,
        user_id: Uuid,
    ) -> AnalyticsResult<AccountOverview> {
        self.analyze_account(source, AccountRef::User(user_id))
    }

    pub fn analyze_group(
        &self,
        source: &dyn LedgerSource,
        group_id: Uuid,
    ) -> AnalyticsResult<AccountOverview> {
        self.analyze_account(source, AccountRef::Group(group_id))
    }
}

/// Analyses `goals` with default configuration, treating `today` as the current date.
pub fn analyze(
    balance: f64,
    goals: &[Goal],
    movements: &[Movement],
    today: NaiveDate,
) -> BTreeMap<Uuid, GoalAnalytics> {
    GoalAnalyzer::new(AnalyticsConfig::default(), Arc::new(FixedClock::on(today)))
        .analyze(balance, goals, movements)
}
