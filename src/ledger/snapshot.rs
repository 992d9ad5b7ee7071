use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountRef, BalanceChange, Goal, GroupAccount, GroupTransaction, UserAccount};
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::ledger::LedgerSource;
use crate::utils::persistence;

/// Self-contained export of accounts, their histories and goals.
///
/// This is the JSON document the CLI reads; it also serves as an in-memory
/// [`LedgerSource`] for callers that already hold the records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub groups: Vec<GroupAccount>,
    #[serde(default)]
    pub balance_changes: Vec<BalanceChange>,
    #[serde(default)]
    pub group_transactions: Vec<GroupTransaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl LedgerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: UserAccount) -> Uuid {
        let id = user.id;
        self.users.push(user);
        id
    }

    pub fn add_group(&mut self, group: GroupAccount) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        id
    }

    pub fn add_balance_change(&mut self, change: BalanceChange) {
        self.balance_changes.push(change);
    }

    pub fn add_group_transaction(&mut self, transaction: GroupTransaction) {
        self.group_transactions.push(transaction);
    }

    pub fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        id
    }

    /// Rejects snapshots holding a negative balance or a non-finite amount.
    pub fn validate(&self) -> AnalyticsResult<()> {
        for user in &self.users {
            check_balance(AccountRef::User(user.id), user.savings)?;
        }
        for group in &self.groups {
            check_balance(AccountRef::Group(group.id), group.balance)?;
        }
        let amounts = self
            .balance_changes
            .iter()
            .map(|c| (c.id, c.amount))
            .chain(self.group_transactions.iter().map(|t| (t.id, t.amount)))
            .chain(self.goals.iter().map(|g| (g.id, g.target_amount)));
        for (id, amount) in amounts {
            if !amount.is_finite() {
                return Err(AnalyticsError::InvalidInput(format!(
                    "record {id} has a non-finite amount"
                )));
            }
        }
        Ok(())
    }

    /// Loads and validates a snapshot from a JSON file.
    pub fn load_from_path(path: &Path) -> AnalyticsResult<Self> {
        let data = fs::read_to_string(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Writes the snapshot atomically by staging to a temporary file.
    pub fn save_to_path(&self, path: &Path) -> AnalyticsResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        persistence::write_atomic(path, &json)?;
        Ok(())
    }
}

fn check_balance(account: AccountRef, balance: f64) -> AnalyticsResult<()> {
    if balance.is_finite() && balance >= 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidInput(format!(
            "{account} has invalid balance {balance}"
        )))
    }
}

impl LedgerSource for LedgerSnapshot {
    fn balance_changes(&self, user_id: Uuid) -> AnalyticsResult<Vec<BalanceChange>> {
        Ok(self
            .balance_changes
            .iter()
            .filter(|change| change.user_id == user_id)
            .cloned()
            .collect())
    }

    fn group_transactions(&self, group_id: Uuid) -> AnalyticsResult<Vec<GroupTransaction>> {
        Ok(self
            .group_transactions
            .iter()
            .filter(|txn| txn.group_id == group_id)
            .cloned()
            .collect())
    }

    fn goals(&self, owner: AccountRef) -> AnalyticsResult<Vec<Goal>> {
        Ok(self
            .goals
            .iter()
            .filter(|goal| goal.owner == owner)
            .cloned()
            .collect())
    }

    fn balance(&self, account: AccountRef) -> AnalyticsResult<f64> {
        let found = match account {
            AccountRef::User(id) => self.users.iter().find(|u| u.id == id).map(|u| u.savings),
            AccountRef::Group(id) => self.groups.iter().find(|g| g.id == id).map(|g| g.balance),
        };
        found.ok_or_else(|| AnalyticsError::UnknownAccount(account.to_string()))
    }
}
