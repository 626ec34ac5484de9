//! Per-document field tables.
//!
//! Each document type (and layout variant) owns a table of field rules; a
//! rule names the field, lists its candidate labels in priority order and
//! builds the extraction options. Fields that need more than one label
//! lookup (AP supplier block, repeated pieces and formats) are handled by
//! code in the document's module.

pub mod ap;
pub mod at;
pub mod os;
pub mod sicaf;

use tracing::{debug, warn};

use super::classify::{classify_os, classify_sicaf};
use super::field::{extract_value, ExtractOptions};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::{DocumentFields, DocumentSubtype, DocumentType, FieldsMap, RawDocument};

/// One single-value field of a document table.
pub struct FieldRule {
    /// Field name in the resulting map.
    pub name: &'static str,
    /// Candidate labels, first match wins.
    pub labels: &'static [&'static str],
    /// Extraction options for this field.
    pub options: fn() -> ExtractOptions,
}

/// Apply every rule of a table, recording `None` for fields not found.
pub(crate) fn apply_rules(
    text: &str,
    rules: &[FieldRule],
    fields: &mut FieldsMap,
) -> Result<(), ExtractionError> {
    for rule in rules {
        let value = extract_value(text, rule.labels, &(rule.options)())?;
        debug!("{}: {:?}", rule.name, value);
        fields.insert(rule.name, value);
    }
    Ok(())
}

/// Extract the fields of a document, detecting the layout of OS and SICAF.
pub fn extract_fields(document: &RawDocument, config: &ExtractionConfig) -> DocumentFields {
    match document.document_type {
        DocumentType::Os => extract_fields_as(document, classify_os(&document.text)),
        DocumentType::Sicaf => extract_fields_as(document, classify_sicaf(&document.text)),
        DocumentType::Ap => fill_fields(document, None, |text, fields| {
            ap::extract(text, fields, config)
        }),
        DocumentType::At => fill_fields(document, None, at::extract),
    }
}

/// Extract the fields of an OS or SICAF document with an explicit layout.
pub fn extract_fields_as(document: &RawDocument, subtype: DocumentSubtype) -> DocumentFields {
    match subtype {
        DocumentSubtype::Os1 => fill_fields(document, Some(subtype), |text, fields| {
            apply_rules(text, os::OS1_RULES, fields)
        }),
        DocumentSubtype::Os2 => fill_fields(document, Some(subtype), |text, fields| {
            apply_rules(text, os::OS2_RULES, fields)
        }),
        DocumentSubtype::Sicaf1 => fill_fields(document, Some(subtype), |text, fields| {
            apply_rules(text, sicaf::SICAF1_RULES, fields)
        }),
        DocumentSubtype::Sicaf2 => fill_fields(document, Some(subtype), sicaf::extract_sicaf2),
    }
}

/// Run a table over the document text, keeping whatever was filled before an error.
fn fill_fields<F>(document: &RawDocument, subtype: Option<DocumentSubtype>, fill: F) -> DocumentFields
where
    F: FnOnce(&str, &mut FieldsMap) -> Result<(), ExtractionError>,
{
    let mut result = DocumentFields::new(document.document_type, document.source.clone());
    result.subtype = subtype;

    if let Err(e) = fill(&document.text, &mut result.fields) {
        warn!(
            "Failed to extract {} fields from {}: {}",
            document.document_type,
            document.file_name(),
            e
        );
    }

    debug!(
        "{} {}: {}/{} fields found",
        document.document_type,
        document.file_name(),
        result.fields.found_count(),
        result.fields.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_detected_for_os_and_sicaf() {
        let config = ExtractionConfig::default();

        let order = RawDocument::new(DocumentType::Os, "E-mail de Leiaute\nOS Nº 77", "os.pdf");
        let fields = extract_fields(&order, &config);
        assert_eq!(fields.subtype, Some(DocumentSubtype::Os1));
        assert_eq!(fields.text(os::OS_NUMBER), Some("77"));

        let record = RawDocument::new(DocumentType::Sicaf, "CNPJ 12.345.678/0001-90", "sicaf.pdf");
        let fields = extract_fields(&record, &config);
        assert_eq!(fields.subtype, Some(DocumentSubtype::Sicaf2));
        assert_eq!(fields.text(sicaf::CNPJ), Some("12.345.678/0001-90"));
    }

    #[test]
    fn test_error_keeps_partial_fields() {
        const RULES: &[FieldRule] = &[
            FieldRule {
                name: "A",
                labels: &["A:"],
                options: ExtractOptions::new,
            },
            FieldRule {
                name: "B",
                labels: &["B:"],
                options: || ExtractOptions::new().line(10),
            },
            FieldRule {
                name: "C",
                labels: &["C:"],
                options: ExtractOptions::new,
            },
        ];

        let document = RawDocument::new(DocumentType::Ap, "A: 1\nB: 2\nC: 3", "ap.pdf");
        let fields = fill_fields(&document, None, |text, fields| apply_rules(text, RULES, fields));

        assert_eq!(fields.fields.text("A"), Some("1"));
        assert!(!fields.fields.contains("B"));
        assert!(!fields.fields.contains("C"));
    }
}
