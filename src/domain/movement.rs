use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes recorded money movements from synthetic goal earmarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MovementKind {
    Transaction,
    GoalAllocation {
        goal_id: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        goal_title: Option<String>,
    },
}

/// A single dated, signed monetary change.
///
/// Positive amounts are contributions, negative amounts are outflows or
/// allocations. Zero is allowed and simply adds nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movement {
    pub occurred_at: NaiveDateTime,
    pub amount: f64,
    pub source_id: String,
    pub kind: MovementKind,
}

impl Movement {
    pub fn transaction(
        occurred_at: NaiveDateTime,
        amount: f64,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            occurred_at,
            amount,
            source_id: source_id.into(),
            kind: MovementKind::Transaction,
        }
    }

    /// Synthetic outflow that earmarks `target_amount` for an approved goal.
    pub fn goal_allocation(
        occurred_at: NaiveDateTime,
        target_amount: f64,
        goal_id: Uuid,
        goal_title: Option<String>,
    ) -> Self {
        Self {
            occurred_at,
            amount: -target_amount,
            source_id: format!("goal:{goal_id}"),
            kind: MovementKind::GoalAllocation {
                goal_id,
                goal_title,
            },
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    pub fn is_allocation(&self) -> bool {
        matches!(self.kind, MovementKind::GoalAllocation { .. })
    }
}
