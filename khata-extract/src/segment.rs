//! Split extracted statement text into per-transaction blocks.
//!
//! A block starts at each line beginning with the statement's date header
//! (`Jan 05, 2024`). Chunks without the transaction marker are page
//! headers, summaries, or trailing boilerplate and are dropped.

use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;

/// Literal that distinguishes a transaction block from boilerplate
pub const TRANSACTION_MARKER: &str = "Transaction ID";

const BLOCK_ANCHOR: &str = r"(?m)^[A-Z][a-z]{2} \d{2}, \d{4}";

/// Segment text into trimmed transaction blocks, preserving source order.
///
/// Zero blocks is a valid outcome (empty statement), not an error.
pub fn split_blocks(text: &str) -> Result<Vec<String>, ExtractError> {
    let anchor = Regex::new(BLOCK_ANCHOR)?;

    // The regex crate has no lookahead, so split by slicing at anchor
    // offsets instead.
    let mut starts: Vec<usize> = anchor.find_iter(text).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }
    starts.push(text.len());

    let blocks: Vec<String> = starts
        .windows(2)
        .map(|w| &text[w[0]..w[1]])
        .filter(|chunk| chunk.contains(TRANSACTION_MARKER))
        .map(|chunk| chunk.trim().to_string())
        .collect();

    debug!("segmented {} transaction blocks", blocks.len());
    Ok(blocks)
}
