//! Daily bucketing and the small statistics the estimators need.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::Movement;

pub const DAYS_PER_WEEK: usize = 7;

/// Sums movements per calendar day. Only days that saw a movement appear.
pub fn daily_buckets(movements: &[Movement]) -> BTreeMap<NaiveDate, f64> {
    let mut buckets = BTreeMap::new();
    for movement in movements {
        *buckets.entry(movement.date()).or_insert(0.0) += movement.amount;
    }
    buckets
}

/// Contiguous per-day totals; days without movements hold `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl DailySeries {
    /// Builds a zero-filled series spanning the first to the last bucket.
    pub fn from_buckets(buckets: &BTreeMap<NaiveDate, f64>) -> Option<Self> {
        let (&start, _) = buckets.first_key_value()?;
        let (&end, _) = buckets.last_key_value()?;
        let len = (end - start).num_days() as usize + 1;
        let mut values = vec![0.0; len];
        for (date, total) in buckets {
            values[(*date - start).num_days() as usize] += total;
        }
        Some(Self { start, values })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(self.values.len() as u64 - 1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Days on or after `cutoff`, or `None` when the series ends before it.
    pub fn since(&self, cutoff: NaiveDate) -> Option<Self> {
        if cutoff > self.end() {
            return None;
        }
        if cutoff <= self.start {
            return Some(self.clone());
        }
        let skip = (cutoff - self.start).num_days() as usize;
        Some(Self {
            start: cutoff,
            values: self.values[skip..].to_vec(),
        })
    }

    pub fn mean(&self) -> Option<f64> {
        mean(&self.values)
    }

    /// Running balance after each day.
    pub fn cumulative(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(0.0, |acc, value| {
                *acc += value;
                Some(*acc)
            })
            .collect()
    }

    /// Totals of every Monday-to-Sunday week lying entirely inside the series.
    ///
    /// Partial weeks at either edge are dropped so a window that starts or
    /// ends mid-week does not drag the median toward zero.
    pub fn complete_week_totals(&self) -> Vec<f64> {
        let to_monday = (DAYS_PER_WEEK - self.start.weekday().num_days_from_monday() as usize)
            % DAYS_PER_WEEK;
        if to_monday >= self.values.len() {
            return Vec::new();
        }
        self.values[to_monday..]
            .chunks_exact(DAYS_PER_WEEK)
            .map(|week| week.iter().sum())
            .collect()
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of `values`; the average of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Ordinary least-squares slope of `ys` against `xs`.
///
/// Returns `None` for mismatched or too-short input and when every `x` is equal.
pub fn least_squares_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;
    let (covariance, variance) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - x_mean;
            (cov + dx * (y - y_mean), var + dx * dx)
        });
    if variance == 0.0 {
        return None;
    }
    Some(covariance / variance)
}
