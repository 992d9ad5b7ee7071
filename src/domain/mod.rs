//! Plain data records shared by the ledger adapter and the analytics engine.

pub mod account;
pub mod common;
pub mod goal;
pub mod movement;
pub mod transaction;

pub use account::{AccountRef, BalanceChange, GroupAccount, UserAccount};
pub use common::Displayable;
pub use goal::{Goal, GoalCategory, GoalStatus};
pub use movement::{Movement, MovementKind};
pub use transaction::{GroupTransaction, TransactionStatus};
