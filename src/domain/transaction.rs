use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin decision state of a group transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// A monetary movement proposed against a group's pooled balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupTransaction {
    pub id: Uuid,
    pub group_id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub occurred_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GroupTransaction {
    pub fn new(group_id: Uuid, amount: f64, occurred_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            amount,
            occurred_at: Some(occurred_at),
            status: TransactionStatus::Pending,
            description: None,
        }
    }

    pub fn approved(mut self) -> Self {
        self.status = TransactionStatus::Approved;
        self
    }

    pub fn denied(mut self) -> Self {
        self.status = TransactionStatus::Denied;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == TransactionStatus::Approved
    }
}
