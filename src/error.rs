use std::str::Utf8Error;

use thiserror::Error;

use crate::extract::DocumentFormat;

/// Errors produced while extracting text or comparing two documents.
///
/// Every failure is returned to the caller; nothing is retried and no partial
/// result is ever produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    /// The filename extension or format tag is not one of `text`, `word-document`, `pdf`.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    /// Plain text bytes are not valid UTF-8.
    #[error("document is not valid UTF-8")]
    Decode(#[from] Utf8Error),
    /// The container of a word-document or pdf could not be opened.
    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },
    /// One of the documents holds no terms after normalization.
    #[error("cannot compare empty documents")]
    EmptyDocument,
}

impl SimilarityError {
    /// `true` for the "could not read the file" family.
    pub fn is_extraction_failure(&self) -> bool {
        !matches!(self, SimilarityError::EmptyDocument)
    }

    /// Message shown to the person who supplied the documents.
    pub fn user_message(&self) -> &'static str {
        if self.is_extraction_failure() {
            "Failed to read one or both files."
        } else {
            "Cannot compare empty documents."
        }
    }
}
