//! Savings goals owned by a user or a group.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{account::AccountRef, common::Displayable};

/// Lifecycle state of a goal.
///
/// Personal goals move between `Active`, `Paused` and `Completed`; group goals
/// are `Proposed` first and then `Approved` or `Denied` by a group admin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Proposed,
    Approved,
    Denied,
    Completed,
    Paused,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    #[default]
    Savings,
    Investment,
    Emergency,
    Vacation,
    Education,
    Home,
    Vehicle,
    Other,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalCategory::Savings => "Savings",
            GoalCategory::Investment => "Investment",
            GoalCategory::Emergency => "Emergency Fund",
            GoalCategory::Vacation => "Vacation",
            GoalCategory::Education => "Education",
            GoalCategory::Home => "Home",
            GoalCategory::Vehicle => "Vehicle",
            GoalCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// A savings target. Without a deadline, analytics plan over a default horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub owner: AccountRef,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<NaiveDateTime>,
}

impl Goal {
    pub fn new(owner: AccountRef, title: impl Into<String>, target_amount: f64) -> Self {
        let status = match owner {
            AccountRef::User(_) => GoalStatus::Active,
            AccountRef::Group(_) => GoalStatus::Proposed,
        };
        Self {
            id: Uuid::new_v4(),
            owner,
            title: title.into(),
            description: String::new(),
            target_amount,
            deadline: None,
            category: GoalCategory::default(),
            status,
            approved_at: None,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_category(mut self, category: GoalCategory) -> Self {
        self.category = category;
        self
    }

    /// Marks a group goal as approved at `approved_at`.
    pub fn approve(&mut self, approved_at: NaiveDateTime) {
        self.status = GoalStatus::Approved;
        self.approved_at = Some(approved_at);
    }

    pub fn set_status(&mut self, status: GoalStatus) {
        self.status = status;
    }

    pub fn is_reached(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Approved goals earmark their target out of the owning group's pool.
    pub fn is_allocated(&self) -> bool {
        self.status == GoalStatus::Approved
    }
}

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.title, self.category)
    }
}
