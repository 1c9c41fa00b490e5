//! Canonical transaction table and CSV export.

use std::io::Write;

use khata_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Canonical column order; downstream layers key on these names.
pub const COLUMNS: [&str; 7] = [
    "timestamp",
    "transaction_id",
    "utr_reference",
    "account_tail",
    "direction",
    "amount",
    "description",
];

/// Ordered, immutable result of one extraction pass. Rows keep the
/// positional order of their source blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    /// Write the table as CSV with the canonical header row. Missing
    /// values serialize as empty cells.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<(), ExtractError> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(COLUMNS)?;

        for txn in &self.rows {
            writer.write_record(&[
                txn.timestamp
                    .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                txn.transaction_id.clone().unwrap_or_default(),
                txn.utr_reference.clone().unwrap_or_default(),
                txn.account_tail.clone().unwrap_or_default(),
                txn.direction
                    .map(|d| d.as_str().to_string())
                    .unwrap_or_default(),
                txn.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
                txn.description.clone().unwrap_or_default(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use khata_core::Direction;

    fn sample_row() -> Transaction {
        Transaction {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 5)
                .map(|d| d.and_hms_opt(10, 30, 0).unwrap()),
            transaction_id: Some("T123".to_string()),
            utr_reference: Some("U456".to_string()),
            account_tail: Some("XX1234".to_string()),
            direction: Some(Direction::Debited),
            amount: Some(250.0),
            description: Some("Acme Store".to_string()),
        }
    }

    #[test]
    fn test_empty_table_keeps_schema() {
        let table = TransactionTable::default();
        assert!(table.is_empty());
        assert_eq!(TransactionTable::columns().len(), 7);

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert_eq!(
            csv.trim(),
            "timestamp,transaction_id,utr_reference,account_tail,direction,amount,description"
        );
    }

    #[test]
    fn test_csv_row_formatting() {
        let table = TransactionTable::new(vec![sample_row()]);
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-05 10:30,T123,U456,XX1234,Debited,250.00,Acme Store");
    }

    #[test]
    fn test_csv_missing_values_are_blank() {
        let mut row = sample_row();
        row.amount = None;
        row.utr_reference = None;
        let table = TransactionTable::new(vec![row]);

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-05 10:30,T123,,XX1234,Debited,,Acme Store");
    }

    #[test]
    fn test_rows_keep_order() {
        let mut first = sample_row();
        first.transaction_id = Some("A".to_string());
        let mut second = sample_row();
        second.transaction_id = Some("B".to_string());

        let table = TransactionTable::new(vec![first, second]);
        let ids: Vec<_> = table
            .iter()
            .map(|t| t.transaction_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
