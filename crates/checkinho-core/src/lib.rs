//! Core library for reconciling advertising production documents.
//!
//! This crate provides:
//! - Field extraction from the text of OS, AP, AT and SICAF documents
//! - Layout detection for OS and SICAF documents
//! - Cross-document checks and the overall OK/NC verdict
//! - PDF text extraction (with the `pdf` feature)

pub mod error;
pub mod extraction;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod run;
pub mod validation;

pub use error::{CheckinhoError, Result};
pub use extraction::{extract_fields, extract_fields_as};
pub use models::{
    CheckField, CheckKind, CheckResult, CheckStatus, CheckinhoConfig, DocumentFields, DocumentSet,
    DocumentSubtype, DocumentType, FieldValue, FieldsMap, OverallStatus, RawDocument, Verdict,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextProvider};
pub use report::render_text;
pub use run::{NoReextraction, RunOutcome, TextProvider, TextStrategy, ValidationRun};
pub use validation::{aggregate, CheckScope, CrossDocumentValidator, ValidationReport};
