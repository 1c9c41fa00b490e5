//! Derived per-row fields: calendar date, hour, weekday, category.
//!
//! Rows whose timestamp is flagged missing keep `None` derived fields and
//! are excluded from time-keyed groupings downstream.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use khata_core::{Category, Ruleset, Transaction};
use khata_extract::TransactionTable;

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub txn: Transaction,
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub weekday: Option<Weekday>,
    pub category: Category,
}

/// Derive analysis columns for every row of the table, in table order.
pub fn enrich(table: &TransactionTable, rules: &Ruleset) -> Vec<EnrichedTransaction> {
    table
        .iter()
        .map(|txn| EnrichedTransaction {
            date: txn.timestamp.map(|ts| ts.date()),
            hour: txn.timestamp.map(|ts| ts.hour()),
            weekday: txn.timestamp.map(|ts| ts.weekday()),
            category: txn
                .description
                .as_deref()
                .map(|desc| rules.categorize(desc))
                .unwrap_or(Category::Other),
            txn: txn.clone(),
        })
        .collect()
}
