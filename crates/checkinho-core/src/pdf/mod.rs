//! PDF processing module.

mod extractor;

pub use extractor::{adjust_text, PdfExtractor, PdfTextProvider};

use crate::error::PdfError;
use crate::run::TextStrategy;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of the whole PDF with the given strategy.
    fn extract_text(&self, strategy: TextStrategy) -> Result<String>;
}
