//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::{ExtractionError, PdfError};
use crate::extraction::patterns::FORMAT_LABEL_GLUED;
use crate::models::config::PdfConfig;
use crate::models::{DocumentType, RawDocument};
use crate::run::{TextProvider, TextStrategy};

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path)
            .map_err(|e| PdfError::Parse(format!("{}: {}", path.display(), e)))?;
        self.load(&data)
    }

    fn stream_text(&self) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self, strategy: TextStrategy) -> Result<String> {
        match strategy {
            TextStrategy::Plain => pdf_extract::extract_text_from_mem(&self.raw_data)
                .map_err(|e| PdfError::TextExtraction(e.to_string())),
            TextStrategy::Stream => self.stream_text(),
            TextStrategy::Layout => {
                let text = self.stream_text()?.replace(' ', "");
                Ok(drop_blank_lines(&text))
            }
        }
    }
}

/// Post-extraction clean-up applied to every extracted text.
pub fn adjust_text(text: &str, config: &PdfConfig) -> String {
    let mut text = text.to_string();
    if config.space_after_format_label {
        text = FORMAT_LABEL_GLUED.replace_all(&text, "$1 $2").into_owned();
    }
    if config.drop_blank_lines {
        text = drop_blank_lines(&text);
    }
    text
}

fn drop_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads document texts from the PDF files named by their sources.
#[derive(Debug, Clone, Default)]
pub struct PdfTextProvider {
    config: PdfConfig,
}

impl PdfTextProvider {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Extract the adjusted text of a PDF file with the given strategy.
    pub fn read_text(&self, path: &Path, strategy: TextStrategy) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load_file(path)?;
        let text = extractor.extract_text(strategy)?;
        let text = adjust_text(&text, &self.config);

        debug!(
            "Extracted {} chars from {} ({})",
            text.len(),
            path.display(),
            strategy
        );
        Ok(text)
    }

    /// Read a PDF file as a document of the given type, using plain text.
    ///
    /// A PDF that cannot be read yields an empty document so that the
    /// failure surfaces as missing fields rather than aborting the run.
    pub fn read_document(&self, path: &Path, document_type: DocumentType) -> RawDocument {
        let text = match self.read_text(path, TextStrategy::Plain) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                String::new()
            }
        };
        RawDocument::new(document_type, text, path.display().to_string())
    }
}

impl TextProvider for PdfTextProvider {
    fn reextract(
        &self,
        document: &RawDocument,
        strategy: TextStrategy,
    ) -> std::result::Result<String, ExtractionError> {
        self.read_text(Path::new(&document.source), strategy)
            .map_err(|e| ExtractionError::Provider {
                source_id: document.source.clone(),
                reason: e.to_string(),
            })
    }
}
