//! Error taxonomy for the extraction pipeline.
//!
//! Only conditions that abort a whole extraction pass are errors. Missing
//! fields, empty documents, and unreadable pages are represented as values
//! (`None` fields, empty tables, empty page text).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Wrong/missing password or corrupt encryption header. Fatal: no
    /// partial text is ever returned for an undecryptable document.
    #[error("failed to decrypt document: {0}")]
    Decryption(#[source] lopdf::Error),

    /// The file could not be read or parsed as a PDF at all.
    #[error("failed to read document: {0}")]
    Document(#[from] lopdf::Error),

    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True when the document was encrypted and could not be opened with
    /// the supplied password (as opposed to not being encrypted at all).
    pub fn is_decryption(&self) -> bool {
        matches!(self, ExtractError::Decryption(_))
    }
}
