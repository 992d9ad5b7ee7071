use tracing::{trace, warn};
use uuid::Uuid;

use crate::domain::{AccountRef, BalanceChange, Goal, GroupTransaction, Movement, TransactionStatus};
use crate::errors::AnalyticsResult;
use crate::ledger::LedgerSource;
use crate::time::Clock;

/// Converts a user's balance-change entries into movements, oldest first.
///
/// Entries without a timestamp cannot be placed on the timeline and are skipped.
pub fn user_movements(changes: &[BalanceChange]) -> Vec<Movement> {
    let mut movements: Vec<Movement> = changes
        .iter()
        .filter_map(|change| match change.date_time {
            Some(at) => Some(Movement::transaction(at, change.amount, change.id.to_string())),
            None => {
                warn!(change = %change.id, "skipping balance change without a timestamp");
                None
            }
        })
        .collect();
    movements.sort_by_key(|movement| movement.occurred_at);
    trace!(count = movements.len(), "built user movements");
    movements
}

/// Converts a group's transactions and approved goals into movements, oldest first.
///
/// With `approved_only`, only approved transactions count; otherwise pending
/// ones are included too. Denied transactions never count. Every approved
/// goal owned by the group contributes one negative movement equal to its
/// target, dated at approval time (or `clock.now()` when that is unknown).
pub fn group_movements(
    group_id: Uuid,
    transactions: &[GroupTransaction],
    goals: &[Goal],
    approved_only: bool,
    clock: &dyn Clock,
) -> Vec<Movement> {
    let mut movements = Vec::with_capacity(transactions.len() + goals.len());

    for txn in transactions.iter().filter(|txn| txn.group_id == group_id) {
        let counted =
            txn.is_approved() || (!approved_only && txn.status == TransactionStatus::Pending);
        if !counted {
            continue;
        }
        match txn.occurred_at {
            Some(at) => movements.push(Movement::transaction(at, txn.amount, txn.id.to_string())),
            None => warn!(transaction = %txn.id, "skipping group transaction without a timestamp"),
        }
    }

    for goal in goals
        .iter()
        .filter(|goal| goal.owner == AccountRef::Group(group_id) && goal.is_allocated())
    {
        let approved_at = goal.approved_at.unwrap_or_else(|| {
            warn!(goal = %goal.id, "approved goal has no approval time; using now");
            clock.now().naive_utc()
        });
        movements.push(Movement::goal_allocation(
            approved_at,
            goal.target_amount,
            goal.id,
            Some(goal.title.clone()),
        ));
    }

    movements.sort_by_key(|movement| movement.occurred_at);
    trace!(count = movements.len(), group = %group_id, "built group movements");
    movements
}

/// Fetches and adapts the full movement history of `account`.
pub fn movements_for(
    source: &dyn LedgerSource,
    account: AccountRef,
    clock: &dyn Clock,
) -> AnalyticsResult<Vec<Movement>> {
    match account {
        AccountRef::User(user_id) => Ok(user_movements(&source.balance_changes(user_id)?)),
        AccountRef::Group(group_id) => {
            let transactions = source.group_transactions(group_id)?;
            let goals = source.goals(account)?;
            Ok(group_movements(group_id, &transactions, &goals, true, clock))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Goal, MovementKind};
    use crate::time::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
    }

    #[test]
    fn user_movements_sorted_and_skip_undated() {
        let user = Uuid::new_v4();
        let mut undated = BalanceChange::new(user, 5.0, at(1));
        undated.date_time = None;
        let changes = vec![
            BalanceChange::new(user, 30.0, at(9)),
            undated,
            BalanceChange::new(user, -10.0, at(3)),
        ];

        let movements = user_movements(&changes);
        let amounts: Vec<f64> = movements.iter().map(|m| m.amount).collect();
        assert_eq!(amounts, vec![-10.0, 30.0]);
        assert!(movements
            .iter()
            .all(|m| m.kind == MovementKind::Transaction));
    }

    #[test]
    fn group_movements_filter_by_status() {
        let group = Uuid::new_v4();
        let transactions = vec![
            GroupTransaction::new(group, 100.0, at(2)).approved(),
            GroupTransaction::new(group, 40.0, at(3)),
            GroupTransaction::new(group, 70.0, at(4)).denied(),
            GroupTransaction::new(Uuid::new_v4(), 999.0, at(5)).approved(),
        ];

        let approved = group_movements(group, &transactions, &[], true, &clock());
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].amount, 100.0);

        let with_pending = group_movements(group, &transactions, &[], false, &clock());
        let amounts: Vec<f64> = with_pending.iter().map(|m| m.amount).collect();
        assert_eq!(amounts, vec![100.0, 40.0]);

        let approved_ids: Vec<String> = transactions
            .iter()
            .filter(|txn| txn.group_id == group && txn.is_approved())
            .map(|txn| txn.id.to_string())
            .collect();
        let approved_sources: Vec<String> =
            approved.iter().map(|m| m.source_id.clone()).collect();
        assert_eq!(approved_sources, approved_ids);
    }

    #[test]
    fn group_transactions_without_timestamp_are_skipped() {
        let group = Uuid::new_v4();
        let mut undated = GroupTransaction::new(group, 250.0, at(7)).approved();
        undated.occurred_at = None;
        let transactions = vec![
            undated,
            GroupTransaction::new(group, 60.0, at(8)).approved(),
        ];

        let movements = group_movements(group, &transactions, &[], true, &clock());

        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].amount, 60.0);
        assert_eq!(movements[0].source_id, transactions[1].id.to_string());
    }

    #[test]
    fn approved_goals_inject_allocations() {
        let group = Uuid::new_v4();
        let mut dated = Goal::new(AccountRef::Group(group), "Bikes", 300.0);
        dated.approve(at(6));
        let mut undated = Goal::new(AccountRef::Group(group), "Tent", 120.0);
        undated.approve(at(1));
        undated.approved_at = None;
        let proposed = Goal::new(AccountRef::Group(group), "Kayak", 800.0);
        let transactions = vec![GroupTransaction::new(group, 500.0, at(2)).approved()];

        let movements = group_movements(
            group,
            &transactions,
            &[dated.clone(), undated.clone(), proposed],
            true,
            &clock(),
        );

        assert_eq!(movements.len(), 3);
        assert_eq!(movements[0].amount, 500.0);
        assert_eq!(movements[1].amount, -300.0);
        assert_eq!(movements[1].source_id, format!("goal:{}", dated.id));
        assert_eq!(movements[2].amount, -120.0);
        assert_eq!(movements[2].occurred_at, clock().now().naive_utc());
        assert!(matches!(
            &movements[2].kind,
            MovementKind::GoalAllocation { goal_id, goal_title: Some(title) }
                if *goal_id == undated.id && title == "Tent"
        ));
    }
}
