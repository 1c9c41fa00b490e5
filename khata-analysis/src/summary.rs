//! Aggregate views over an extracted table: flow totals, daily and
//! time-pattern groupings, merchant ranking, and outlier detection.
//!
//! Rows with missing amounts are skipped by every aggregate; rows with
//! missing timestamps are skipped by the time-keyed ones.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use khata_core::{Category, Direction, Ruleset, Transaction};
use khata_extract::TransactionTable;
use serde::{Deserialize, Serialize};

/// Debit/credit totals for one grouping bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub debited: f64,
    pub credited: f64,
}

impl Flow {
    fn add(&mut self, direction: Direction, amount: f64) {
        match direction {
            Direction::Debited => self.debited += amount,
            Direction::Credited => self.credited += amount,
        }
    }
}

/// Whole-table totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total_debited: f64,
    pub total_credited: f64,
    pub transaction_count: usize,
}

impl FlowSummary {
    pub fn from_table(table: &TransactionTable) -> Self {
        let mut summary = FlowSummary {
            transaction_count: table.len(),
            ..Default::default()
        };
        for txn in table {
            let (Some(direction), Some(amount)) = (txn.direction, txn.amount) else {
                continue;
            };
            match direction {
                Direction::Debited => summary.total_debited += amount,
                Direction::Credited => summary.total_credited += amount,
            }
        }
        summary
    }

    pub fn net_flow(&self) -> f64 {
        self.total_credited - self.total_debited
    }
}

/// Per-day debit/credit totals, in date order.
pub fn daily_flows(table: &TransactionTable) -> BTreeMap<NaiveDate, Flow> {
    let mut days: BTreeMap<NaiveDate, Flow> = BTreeMap::new();
    for txn in table {
        let (Some(ts), Some(direction), Some(amount)) = (txn.timestamp, txn.direction, txn.amount)
        else {
            continue;
        };
        days.entry(ts.date()).or_default().add(direction, amount);
    }
    days
}

/// Debit/credit totals per weekday, Monday first.
pub fn weekday_flows(table: &TransactionTable) -> [(Weekday, Flow); 7] {
    use Weekday::*;
    let mut week = [
        (Mon, Flow::default()),
        (Tue, Flow::default()),
        (Wed, Flow::default()),
        (Thu, Flow::default()),
        (Fri, Flow::default()),
        (Sat, Flow::default()),
        (Sun, Flow::default()),
    ];
    for txn in table {
        let (Some(ts), Some(direction), Some(amount)) = (txn.timestamp, txn.direction, txn.amount)
        else {
            continue;
        };
        let idx = ts.weekday().num_days_from_monday() as usize;
        week[idx].1.add(direction, amount);
    }
    week
}

/// Debit/credit totals per hour of day.
pub fn hourly_flows(table: &TransactionTable) -> [Flow; 24] {
    let mut hours = [Flow::default(); 24];
    for txn in table {
        let (Some(ts), Some(direction), Some(amount)) = (txn.timestamp, txn.direction, txn.amount)
        else {
            continue;
        };
        hours[ts.hour() as usize].add(direction, amount);
    }
    hours
}

/// Debit totals grouped by description, largest first, at most `n` entries.
pub fn top_merchants(table: &TransactionTable, n: usize) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for txn in table {
        let (Some(desc), Some(amount)) = (txn.description.as_deref(), txn.amount) else {
            continue;
        };
        if txn.direction == Some(Direction::Debited) {
            *totals.entry(desc).or_default() += amount;
        }
    }

    let mut merchants: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(desc, total)| (desc.to_string(), total))
        .collect();
    merchants.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    merchants.truncate(n);
    merchants
}

/// Amount totals per category over all rows with a description and amount.
pub fn category_totals(table: &TransactionTable, rules: &Ruleset) -> Vec<(Category, f64)> {
    let mut totals: HashMap<Category, f64> = HashMap::new();
    for txn in table {
        let (Some(desc), Some(amount)) = (txn.description.as_deref(), txn.amount) else {
            continue;
        };
        *totals.entry(rules.categorize(desc)).or_default() += amount;
    }

    let mut out: Vec<(Category, f64)> = totals.into_iter().collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.as_str().cmp(b.0.as_str())));
    out
}

/// Unusually large transactions: amount above mean + 2 standard
/// deviations (sample) of all present amounts. Fewer than two amounts
/// means no defined spread, so no outliers.
pub fn outliers(table: &TransactionTable) -> Vec<Transaction> {
    let amounts: Vec<f64> = table.iter().filter_map(|t| t.amount).collect();
    if amounts.len() < 2 {
        return Vec::new();
    }

    let n = amounts.len() as f64;
    let mean = amounts.iter().sum::<f64>() / n;
    let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let threshold = mean + 2.0 * variance.sqrt();

    table
        .iter()
        .filter(|t| t.amount.is_some_and(|a| a > threshold))
        .cloned()
        .collect()
}
