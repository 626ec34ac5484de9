//! SICAF (supplier registration) fields.

use super::FieldRule;
use crate::error::ExtractionError;
use crate::extraction::field::ExtractOptions;
use crate::extraction::patterns::CNPJ as CNPJ_PATTERN;
use crate::models::{FieldValue, FieldsMap};

pub const COMPANY_NAME: &str = "Razão social";
pub const CNPJ: &str = "CNPJ";
pub const MUNICIPALITY: &str = "Município";

/// Report layout.
pub const SICAF1_RULES: &[FieldRule] = &[
    FieldRule {
        name: COMPANY_NAME,
        labels: &["Razao Social:", "Razão Social:"],
        options: ExtractOptions::new,
    },
    FieldRule {
        name: CNPJ,
        labels: &["CNPJ: ", "CNPJ:"],
        options: || ExtractOptions::new().stop_before(["Data"]),
    },
    FieldRule {
        name: MUNICIPALITY,
        labels: &["Municipio: ", "Munícipio:"],
        options: || ExtractOptions::new().stop_before([" N°"]),
    },
];

/// Declaration layout: only the first CNPJ-shaped token is reliable.
pub(crate) fn extract_sicaf2(text: &str, fields: &mut FieldsMap) -> Result<(), ExtractionError> {
    let cnpj = CNPJ_PATTERN
        .find(text)
        .map(|m| FieldValue::Text(m.as_str().to_string()));
    fields.insert(CNPJ, cnpj);
    Ok(())
}
