//! AT (art/production ticket) fields.

use super::{apply_rules, FieldRule};
use crate::error::ExtractionError;
use crate::extraction::field::ExtractOptions;
use crate::extraction::repeated::{extract_values, RepeatedOptions};
use crate::models::FieldsMap;

/// Number the AT declares for itself.
pub const AT_NUMBER: &str = "AT";
pub const TITLE: &str = "TITULO";
pub const DATE: &str = "Data da AT";
/// Prefix of the numbered format fields.
pub const FORMAT_PREFIX: &str = "FORMATO";

const HEADER_RULES: &[FieldRule] = &[
    FieldRule {
        name: AT_NUMBER,
        labels: &["AT "],
        options: || ExtractOptions::new().stop_before(["DATA"]),
    },
    FieldRule {
        name: TITLE,
        labels: &["TITULO: ", "TÍTULO:", "Título:"],
        options: || ExtractOptions::new().stop_before(["Cores", "CORES"]),
    },
];

const DATE_RULES: &[FieldRule] = &[FieldRule {
    name: DATE,
    labels: &["Data:", "DATA:"],
    options: || ExtractOptions::new().date_only(),
}];

const FORMAT_LABELS: &[&str] = &["FORMATO:", "Formato"];

pub(crate) fn extract(text: &str, fields: &mut FieldsMap) -> Result<(), ExtractionError> {
    apply_rules(text, HEADER_RULES, fields)?;

    let formats = extract_values(text, FORMAT_LABELS, &RepeatedOptions::new());
    for (i, format) in formats.into_iter().enumerate() {
        fields.insert_text(format!("{FORMAT_PREFIX}{}", i + 1), format);
    }

    apply_rules(text, DATE_RULES, fields)
}
