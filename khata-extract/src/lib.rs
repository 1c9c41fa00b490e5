//! khata-extract: statement extraction pipeline (PDF → text → blocks → table).

pub mod error;
pub mod parse;
pub mod pdf;
pub mod segment;
pub mod table;

pub use error::ExtractError;
pub use parse::{AmountPick, BlockParser, ParseOptions};
pub use table::{COLUMNS, TransactionTable};

use std::path::{Path, PathBuf};

/// Owns the full pipeline for one document:
/// decrypt → extract page text → segment → parse → assemble.
///
/// Each call to [`StatementExtractor::extract`] is an independent pass;
/// the extractor holds no state beyond its inputs.
pub struct StatementExtractor {
    path: PathBuf,
    password: Option<String>,
    options: ParseOptions,
}

impl StatementExtractor {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            password: None,
            options: ParseOptions::default(),
        }
    }

    /// Password to use when the document reports itself as encrypted.
    /// Callers own credential retrieval (flag, env var, prompt).
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one extraction pass over the document.
    pub fn extract(&self) -> Result<TransactionTable, ExtractError> {
        let text = pdf::extract_document_text(&self.path, self.password.as_deref())?;
        extract_from_text(&text, &self.options)
    }
}

/// Build the table from already-extracted statement text. Split out from
/// the PDF layer so the parsing pipeline is testable on plain text.
pub fn extract_from_text(
    text: &str,
    options: &ParseOptions,
) -> Result<TransactionTable, ExtractError> {
    let parser = BlockParser::new(options.clone())?;
    let blocks = segment::split_blocks(text)?;
    let rows = blocks.iter().map(|block| parser.parse_block(block)).collect();
    Ok(TransactionTable::new(rows))
}
