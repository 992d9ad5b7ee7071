//! Movement ledger adapter: turns stored account records into the uniform
//! movement sequence the rate estimator consumes.

pub mod adapter;
pub mod snapshot;

use uuid::Uuid;

use crate::domain::{AccountRef, BalanceChange, Goal, GroupTransaction};
use crate::errors::AnalyticsResult;

pub use adapter::{group_movements, movements_for, user_movements};
pub use snapshot::LedgerSnapshot;

/// Read-only access to the records backing one account's history.
///
/// Implementations must hand out a consistent snapshot for the duration of a
/// single analysis call; the analytics layer never re-reads mid-computation.
pub trait LedgerSource: Send + Sync {
    /// Balance-change entries recorded for a personal saver.
    fn balance_changes(&self, user_id: Uuid) -> AnalyticsResult<Vec<BalanceChange>>;

    /// Every transaction filed against a group, regardless of status.
    fn group_transactions(&self, group_id: Uuid) -> AnalyticsResult<Vec<GroupTransaction>>;

    /// Goals owned by `owner`.
    fn goals(&self, owner: AccountRef) -> AnalyticsResult<Vec<Goal>>;

    /// Currently available funds of `account` (`savings` or group `balance`).
    fn balance(&self, account: AccountRef) -> AnalyticsResult<f64>;
}
