//! Transaction record types produced by statement extraction

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether money left or entered the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "Debited")]
    Debited,
    #[serde(rename = "Credited")]
    Credited,
}

impl Direction {
    /// Parse the verb of a "Debited from" / "Credited to" phrase.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "Debited" => Some(Direction::Debited),
            "Credited" => Some(Direction::Credited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debited => "Debited",
            Direction::Credited => "Credited",
        }
    }
}

/// One statement transaction. Every field is parsed independently from the
/// source block, so any of them can be missing without dropping the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Combined date + time of the transaction; `None` when either token
    /// was absent or did not form a valid calendar timestamp.
    pub timestamp: Option<NaiveDateTime>,
    /// Statement-assigned transaction identifier (uniqueness not enforced)
    pub transaction_id: Option<String>,
    /// Bank UTR reference for interbank transfers
    pub utr_reference: Option<String>,
    /// Counter-account identifier fragment (e.g. "XX1234")
    pub account_tail: Option<String>,
    pub direction: Option<Direction>,
    /// Monetary amount, always non-negative in the source format
    pub amount: Option<f64>,
    /// Counterparty name / memo
    pub description: Option<String>,
}

impl Transaction {
    /// A row with every field missing. Parsing fills in what it finds.
    pub fn empty() -> Self {
        Self {
            timestamp: None,
            transaction_id: None,
            utr_reference: None,
            account_tail: None,
            direction: None,
            amount: None,
            description: None,
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Some(Direction::Debited)
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Some(Direction::Credited)
    }

    /// Returns true when the row could not be placed in time.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_direction_from_verb() {
        assert_eq!(Direction::from_verb("Debited"), Some(Direction::Debited));
        assert_eq!(Direction::from_verb("Credited"), Some(Direction::Credited));
        assert_eq!(Direction::from_verb("Refunded"), None);
    }

    #[test]
    fn test_empty_row_has_no_fields() {
        let txn = Transaction::empty();
        assert!(!txn.has_timestamp());
        assert!(!txn.is_debit());
        assert!(!txn.is_credit());
        assert_eq!(txn.amount, None);
    }

    #[test]
    fn test_serde_round_trip() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let txn = Transaction {
            timestamp: Some(ts),
            transaction_id: Some("T123".to_string()),
            utr_reference: Some("U456".to_string()),
            account_tail: Some("XX1234".to_string()),
            direction: Some(Direction::Debited),
            amount: Some(250.0),
            description: Some("Acme Store".to_string()),
        };

        let json = serde_json::to_string(&txn).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
        assert!(json.contains("\"Debited\""));
    }
}
