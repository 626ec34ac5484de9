//! Error types for the checkinho-core library.

use thiserror::Error;

use crate::models::document::DocumentType;

/// Main error type for the checkinho library.
#[derive(Error, Debug)]
pub enum CheckinhoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// A mandatory document (OS, AP or SICAF) was not supplied for a run.
    #[error("missing mandatory document: {0}")]
    MissingDocument(DocumentType),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A line restriction points outside the document.
    #[error("line range {start}..={end} is outside a document of {available} lines")]
    LineRange {
        start: usize,
        end: usize,
        available: usize,
    },

    /// The text provider cannot produce the requested strategy.
    #[error("text strategy {0} is not available")]
    StrategyUnavailable(String),

    /// The text provider failed to re-extract a document.
    #[error("failed to re-extract {source_id}: {reason}")]
    Provider { source_id: String, reason: String },
}

/// Errors raised while evaluating a single cross-document check.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date field did not parse as DD/MM/YYYY.
    #[error("failed to parse {field} date: {value:?}")]
    DateParse { field: String, value: String },
}

/// Result type for the checkinho library.
pub type Result<T> = std::result::Result<T, CheckinhoError>;
