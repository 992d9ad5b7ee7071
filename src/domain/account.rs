use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner of a savings balance: an individual user or a pooled group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AccountRef {
    User(Uuid),
    Group(Uuid),
}

impl AccountRef {
    pub fn id(&self) -> Uuid {
        match self {
            AccountRef::User(id) | AccountRef::Group(id) => *id,
        }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::User(id) => write!(f, "user:{id}"),
            AccountRef::Group(id) => write!(f, "group:{id}"),
        }
    }
}

/// A personal saver and their currently available savings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub savings: f64,
}

impl UserAccount {
    pub fn new(username: impl Into<String>, savings: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            savings,
        }
    }
}

/// A savings group whose members pool funds into one balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAccount {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub balance: f64,
}

impl GroupAccount {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
        }
    }
}

/// Delta applied to a user's savings at a point in time (not the resulting balance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceChange {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub date_time: Option<NaiveDateTime>,
}

impl BalanceChange {
    pub fn new(user_id: Uuid, amount: f64, date_time: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            date_time: Some(date_time),
        }
    }
}
