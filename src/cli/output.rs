use chrono::{DateTime, Utc};
use colored::Colorize;
use std::fmt;

use crate::analytics::{AccountOverview, GoalAnalytics};
use crate::domain::{Displayable, Goal};

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {} ===", title.to_string().trim()).bold());
}

pub fn info(message: impl fmt::Display) {
    println!("{message}");
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", format!("WARNING: {message}").bright_yellow());
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{}", format!("ERROR: {message}").bright_red());
}

fn amount(value: Option<f64>, currency: &str) -> String {
    match value {
        Some(value) => format!("{value:.2} {currency}"),
        None => "unknown".into(),
    }
}

fn eta_label(eta_ts: Option<i64>) -> String {
    eta_ts
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .map(|instant| instant.date_naive().to_string())
        .unwrap_or_else(|| "not achievable at current pace".into())
}

/// Renders an account overview followed by one block per goal.
pub fn print_overview(overview: &AccountOverview, goals: &[Goal], currency: &str) {
    section(format!("Account {}", overview.account));
    info(format!("  Balance        : {:.2} {currency}", overview.balance));
    info(format!("  Rate per day   : {}", amount(overview.rate.per_day, currency)));
    info(format!("  Rate per week  : {}", amount(overview.rate.per_week, currency)));
    info(format!("  Rate per month : {}", amount(overview.rate.per_month, currency)));
    info(format!("  Goals          : {}", overview.goal_count));
    info(format!(
        "  Total remaining: {:.2} {currency}",
        overview.total_remaining
    ));
    if overview.rate.per_day.is_none() {
        warning("not enough history to estimate a savings rate");
    }

    for goal in goals {
        if let Some(result) = overview.goals.get(&goal.id) {
            print_goal(goal, result, currency);
        }
    }
}

fn print_goal(goal: &Goal, result: &GoalAnalytics, currency: &str) {
    section(goal.display_label());
    let progress = format!("{:.1}%", result.progress_percent);
    let progress = if result.progress_percent >= 100.0 {
        progress.bright_green().to_string()
    } else {
        progress
    };
    info(format!("  Remaining      : {:.2} {currency}", result.remaining));
    info(format!("  Progress       : {progress}"));
    info(format!(
        "  Required pace  : {} / day",
        amount(result.required_daily_pace, currency)
    ));
    info(format!("  ETA            : {}", eta_label(result.eta_ts)));
}
