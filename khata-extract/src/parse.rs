//! Per-block field parsing.
//!
//! Every field has its own pattern and is parsed independently: a missing
//! or malformed field degrades to `None` without touching the others.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use khata_core::{Direction, Transaction};
use regex::Regex;

use crate::error::ExtractError;

/// Which decimal number to take when a block contains more than one
/// (e.g. a running balance alongside the amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountPick {
    /// First decimal in the block. Matches the observed statement layout;
    /// a documented limitation when a balance figure precedes the amount.
    #[default]
    First,
    /// Last decimal in the block.
    Last,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub amount_pick: AmountPick,
}

/// Compiled field patterns; build once, reuse across blocks.
pub struct BlockParser {
    options: ParseOptions,
    date_re: Regex,
    time_re: Regex,
    desc_re: Regex,
    detail_re: Regex,
    amount_re: Regex,
    txn_id_re: Regex,
    utr_re: Regex,
}

impl BlockParser {
    pub fn new(options: ParseOptions) -> Result<Self, ExtractError> {
        Ok(Self {
            options,
            date_re: Regex::new(r"[A-Z][a-z]{2} \d{2}, \d{4}")?,
            time_re: Regex::new(r"\d{2}:\d{2} [AP]M")?,
            desc_re: Regex::new(r"(?:Paid to|Received from) (.+)")?,
            detail_re: Regex::new(r"(Debited from|Credited to) (.+)")?,
            amount_re: Regex::new(r"\d+\.\d+")?,
            txn_id_re: Regex::new(r"Transaction ID\s*:\s*(\S+)")?,
            utr_re: Regex::new(r"UTR No\s*:\s*(\S+)")?,
        })
    }

    /// Parse one transaction block. Never fails: unmatched fields are
    /// `None` in the returned row.
    pub fn parse_block(&self, block: &str) -> Transaction {
        let mut txn = Transaction::empty();

        txn.timestamp = self.parse_timestamp(block);

        txn.description = self
            .desc_re
            .captures(block)
            .map(|caps| caps[1].trim().to_string());

        if let Some(caps) = self.detail_re.captures(block) {
            txn.direction = caps[1]
                .split_whitespace()
                .next()
                .and_then(Direction::from_verb);
            txn.account_tail = caps[2]
                .split_whitespace()
                .next()
                .map(str::to_string);
        }

        txn.amount = self.parse_amount(block);

        txn.transaction_id = self
            .txn_id_re
            .captures(block)
            .map(|caps| caps[1].to_string());

        txn.utr_reference = self
            .utr_re
            .captures(block)
            .map(|caps| caps[1].to_string());

        txn
    }

    /// A timestamp needs both a date and a time token, each forming a
    /// valid calendar value; otherwise the row is flagged with `None`.
    fn parse_timestamp(&self, block: &str) -> Option<NaiveDateTime> {
        let date = self
            .date_re
            .find(block)
            .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%b %d, %Y").ok())?;
        let time = self
            .time_re
            .find(block)
            .and_then(|m| NaiveTime::parse_from_str(m.as_str(), "%I:%M %p").ok())?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Unparseable or absent amounts become `None`, never an error.
    fn parse_amount(&self, block: &str) -> Option<f64> {
        let found = match self.options.amount_pick {
            AmountPick::First => self.amount_re.find(block),
            AmountPick::Last => self.amount_re.find_iter(block).last(),
        };
        found.and_then(|m| m.as_str().parse::<f64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parser() -> BlockParser {
        BlockParser::new(ParseOptions::default()).unwrap()
    }

    const FULL_BLOCK: &str = "Jan 05, 2024\n10:30 AM\nPaid to Acme Store\nDebited from XX1234\n250.00\nTransaction ID: T123\nUTR No: U456";

    #[test]
    fn test_full_block_round_trip() {
        let txn = parser().parse_block(FULL_BLOCK);

        let expected_ts = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(txn.timestamp, Some(expected_ts));
        assert_eq!(txn.transaction_id.as_deref(), Some("T123"));
        assert_eq!(txn.utr_reference.as_deref(), Some("U456"));
        assert_eq!(txn.account_tail.as_deref(), Some("XX1234"));
        assert_eq!(txn.direction, Some(Direction::Debited));
        assert_eq!(txn.amount, Some(250.0));
        assert_eq!(txn.description.as_deref(), Some("Acme Store"));
    }

    #[test]
    fn test_missing_amount_degrades_to_none() {
        let block = FULL_BLOCK.replace("250.00\n", "");
        let txn = parser().parse_block(&block);
        assert_eq!(txn.amount, None);
        // Every other field still parses.
        assert_eq!(txn.transaction_id.as_deref(), Some("T123"));
        assert_eq!(txn.description.as_deref(), Some("Acme Store"));
    }

    #[test]
    fn test_received_from_credit() {
        let block = "Feb 10, 2024\n09:05 PM\nReceived from Ramesh Kumar\nCredited to XX9876\n1200.50\nTransaction ID: T77";
        let txn = parser().parse_block(block);
        assert_eq!(txn.direction, Some(Direction::Credited));
        assert_eq!(txn.account_tail.as_deref(), Some("XX9876"));
        assert_eq!(txn.description.as_deref(), Some("Ramesh Kumar"));
        assert_eq!(txn.amount, Some(1200.50));
        assert_eq!(txn.utr_reference, None);
    }

    #[test]
    fn test_missing_time_flags_timestamp() {
        let block = FULL_BLOCK.replace("10:30 AM\n", "");
        let txn = parser().parse_block(&block);
        assert_eq!(txn.timestamp, None);
        assert_eq!(txn.amount, Some(250.0));
    }

    #[test]
    fn test_invalid_calendar_date_flags_timestamp() {
        // Feb 30 matches the date pattern but is not a real date.
        let block = FULL_BLOCK.replace("Jan 05, 2024", "Feb 30, 2024");
        let txn = parser().parse_block(&block);
        assert_eq!(txn.timestamp, None);
    }

    #[test]
    fn test_amount_first_match_wins_by_default() {
        // Known limitation: a leading balance figure shadows the amount.
        let block = "Jan 05, 2024\n10:30 AM\nBalance 9999.99\nPaid to Acme Store\n250.00\nTransaction ID: T123";
        let txn = parser().parse_block(block);
        assert_eq!(txn.amount, Some(9999.99));
    }

    #[test]
    fn test_amount_pick_last() {
        let block = "Jan 05, 2024\n10:30 AM\nBalance 9999.99\nPaid to Acme Store\n250.00\nTransaction ID: T123";
        let parser = BlockParser::new(ParseOptions {
            amount_pick: AmountPick::Last,
        })
        .unwrap();
        let txn = parser.parse_block(block);
        assert_eq!(txn.amount, Some(250.0));
    }

    #[test]
    fn test_description_stops_at_line_end() {
        let block = "Jan 05, 2024\nPaid to Acme Store\nDebited from XX1234\nTransaction ID: T1";
        let txn = parser().parse_block(block);
        assert_eq!(txn.description.as_deref(), Some("Acme Store"));
    }

    #[test]
    fn test_transaction_id_colon_spacing() {
        let txn = parser().parse_block("Jan 05, 2024\nTransaction ID  :  ABC123");
        assert_eq!(txn.transaction_id.as_deref(), Some("ABC123"));
    }
}
