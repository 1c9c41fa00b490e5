//! PDF decryption and page-text extraction.
//!
//! Decryption failure aborts the pass; a page that yields no text does
//! not, so image-only or malformed pages cannot lose the rest of the
//! statement.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::ExtractError;

/// Extract the concatenated text of all pages, in document order.
///
/// `password` is only consulted when the document reports itself as
/// encrypted; an absent password is treated as the empty string.
pub fn extract_document_text(
    path: impl AsRef<Path>,
    password: Option<&str>,
) -> Result<String, ExtractError> {
    let mut doc = Document::load(path.as_ref())?;

    if doc.is_encrypted() {
        doc.decrypt(password.unwrap_or(""))
            .map_err(ExtractError::Decryption)?;
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());
    for page_no in page_numbers {
        match doc.extract_text(&[page_no]) {
            Ok(text) => pages.push(text),
            Err(err) => {
                warn!("page {page_no} yielded no text: {err}");
                pages.push(String::new());
            }
        }
    }

    debug!("extracted text from {} pages", pages.len());
    Ok(pages.join("\n"))
}
