#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Days, NaiveDate, NaiveDateTime};
use savings_pace::{
    config::AnalyticsConfig,
    domain::{AccountRef, Goal, GroupAccount, GroupTransaction, Movement},
    ledger::LedgerSnapshot,
    FixedClock, GoalAnalyzer,
};
use uuid::Uuid;

/// Monday; the reference "today" for every fixture.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today() - Days::new(days)
}

pub fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

/// One movement of `amount` per day for `count` days starting at `start`.
pub fn daily_movements(start: NaiveDate, count: u64, amount: f64) -> Vec<Movement> {
    (0..count)
        .map(|offset| {
            Movement::transaction(
                noon(start + Days::new(offset)),
                amount,
                format!("daily-{offset}"),
            )
        })
        .collect()
}

pub fn analyzer() -> GoalAnalyzer {
    analyzer_with(AnalyticsConfig::default())
}

pub fn analyzer_with(config: AnalyticsConfig) -> GoalAnalyzer {
    GoalAnalyzer::new(config, Arc::new(FixedClock::on(today())))
}

pub struct GroupFixture {
    pub snapshot: LedgerSnapshot,
    pub group_id: Uuid,
    pub cabin_id: Uuid,
    pub gear_id: Uuid,
}

/// Group with 400 pooled, two weeks of +70/day approved deposits, one approved
/// 140 goal (allocated on Wednesday of the second week) and one proposed goal.
pub fn group_fixture() -> GroupFixture {
    let mut snapshot = LedgerSnapshot::new();
    let group_id = snapshot.add_group(GroupAccount::new("Hiking club", 400.0));
    let start = days_ago(14);
    for offset in 0..14 {
        snapshot.add_group_transaction(
            GroupTransaction::new(group_id, 70.0, noon(start + Days::new(offset))).approved(),
        );
    }
    snapshot.add_group_transaction(GroupTransaction::new(group_id, 500.0, noon(days_ago(9))));
    snapshot.add_group_transaction(
        GroupTransaction::new(group_id, 1000.0, noon(days_ago(8))).denied(),
    );

    let mut gear = Goal::new(AccountRef::Group(group_id), "Camping gear", 140.0);
    gear.approve(noon(days_ago(5)));
    let gear_id = snapshot.add_goal(gear);
    let cabin_id = snapshot.add_goal(Goal::new(AccountRef::Group(group_id), "Cabin", 1000.0));

    GroupFixture {
        snapshot,
        group_id,
        cabin_id,
        gear_id,
    }
}
