//! AP (authorization) fields.
//!
//! Besides the single-value table the AP carries the supplier block, located
//! around the supplier CNPJ line, and the repeated piece/format lines.

use tracing::debug;

use super::{apply_rules, FieldRule};
use crate::error::ExtractionError;
use crate::extraction::field::{extract_value, ExtractOptions};
use crate::extraction::patterns::{CNPJ as CNPJ_PATTERN, COLON};
use crate::extraction::repeated::{extract_values, RepeatedOptions};
use crate::models::config::ExtractionConfig;
use crate::models::{FieldValue, FieldsMap};

pub const OS_NUMBER: &str = "OS N°";
pub const ISSUE_DATE: &str = "DATA EMISSAO";
pub const CAMPAIGN: &str = "CAMPANHA";
pub const PRODUCT: &str = "PRODUTO";
pub const CLIENT_AUTHORIZATION: &str = "AUT.CLIENTE";
pub const PRODUCTION_ATS: &str = "AT DE PRODUCAO";
pub const CNPJ: &str = "CNPJ";
pub const COMPANY_NAME: &str = "Razão social";
pub const MUNICIPALITY: &str = "Município";
/// Prefix of the numbered piece fields (`PECA1`, `PECA2`, ...).
pub const PIECE_PREFIX: &str = "PECA";
/// Prefix of the numbered format fields (`FORMATO1`, ...).
pub const FORMAT_PREFIX: &str = "FORMATO";

pub const AP_RULES: &[FieldRule] = &[
    FieldRule {
        name: OS_NUMBER,
        labels: &["OS N°", "OS Nº", "OSNº"],
        options: || ExtractOptions::new().stop_before(["VALOR"]).only_numbers(),
    },
    FieldRule {
        name: ISSUE_DATE,
        labels: &["DATA EMISSAO", "DATA EMISSÃO", "DATAEMISSÃO", "DATA  EMISSÃO:"],
        options: || ExtractOptions::new().date_only(),
    },
    FieldRule {
        name: CAMPAIGN,
        labels: &["CAMPANHA:"],
        options: || ExtractOptions::new().stop_before(["AUT.", "MEIO:"]),
    },
    FieldRule {
        name: PRODUCT,
        labels: &["PRODUTO:"],
        options: || ExtractOptions::new().stop_before([" "]),
    },
    FieldRule {
        name: CLIENT_AUTHORIZATION,
        labels: &["AUT.CLIENTE:"],
        options: || ExtractOptions::new().check_next_line_if_empty(),
    },
    FieldRule {
        name: PRODUCTION_ATS,
        labels: &[
            "AT DE PRODUCAO:",
            "AT DE PRODUÇÃO:",
            "AT DE PRODUCAO",
            "AT DE PRODUÇÃO",
            "ATDEPRODUÇÃO",
            "AT'SDEPRODUÇÃO",
            "AT'S DE PRODUÇÃO",
        ],
        options: || {
            ExtractOptions::new()
                .stop_before(["-"])
                .exclude_pattern(&COLON)
                .split_by("E")
        },
    },
];

const CNPJ_LABELS: &[&str] = &["Cnpj: ", "CNPJ:"];
const PIECE_LABELS: &[&str] = &["PEÇA", "PECA"];
const FORMAT_LABELS: &[&str] = &["FORMATO"];

/// Lines above the CNPJ line searched for the municipality.
const MUNICIPALITY_WINDOW: usize = 3;

pub(crate) fn extract(
    text: &str,
    fields: &mut FieldsMap,
    config: &ExtractionConfig,
) -> Result<(), ExtractionError> {
    apply_rules(text, AP_RULES, fields)?;

    let lines: Vec<&str> = text.split('\n').collect();

    let cnpj = supplier_cnpj(text, &lines, &config.excluded_cnpj_prefixes)?;
    debug!("{}: {:?}", CNPJ, cnpj);
    fields.insert(CNPJ, cnpj.clone().map(FieldValue::Text));

    let cnpj_line = cnpj
        .as_deref()
        .filter(|value| !value.is_empty())
        .and_then(|value| lines.iter().position(|line| line.contains(value)));

    match cnpj_line {
        Some(idx) => {
            fields.insert(COMPANY_NAME, company_name_above(&lines, idx).map(FieldValue::Text));
            fields.insert_text(MUNICIPALITY, municipality_above(&lines, idx));
        }
        None => {
            fields.insert(COMPANY_NAME, None);
            fields.insert(MUNICIPALITY, None);
        }
    }

    let pieces = extract_values(
        text,
        PIECE_LABELS,
        &RepeatedOptions::new().stop_before(["FORMATO"]).after_dash(),
    );
    for (i, piece) in pieces.into_iter().enumerate() {
        fields.insert_text(format!("{PIECE_PREFIX}{}", i + 1), piece);
    }

    let formats = extract_values(text, FORMAT_LABELS, &RepeatedOptions::new());
    for (i, format) in formats.iter().enumerate() {
        let cleaned: String = format
            .trim()
            .trim_matches(':')
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        fields.insert_text(format!("{FORMAT_PREFIX}{}", i + 1), cleaned);
    }

    Ok(())
}

/// CNPJ of the supplier, skipping the issuer's own registration.
///
/// When the labelled value carries an excluded prefix the first CNPJ-shaped
/// token of any line without it is used instead; without one the labelled
/// value is kept.
fn supplier_cnpj(
    text: &str,
    lines: &[&str],
    excluded_prefixes: &[String],
) -> Result<Option<String>, ExtractionError> {
    let is_excluded = |value: &str| excluded_prefixes.iter().any(|prefix| value.contains(prefix.as_str()));

    let labelled = extract_value(text, CNPJ_LABELS, &ExtractOptions::new())?
        .and_then(|value| value.as_text().map(str::to_string));

    let Some(value) = labelled else {
        return Ok(None);
    };
    if !is_excluded(&value) {
        return Ok(Some(value));
    }

    let alternative = lines
        .iter()
        .filter_map(|line| CNPJ_PATTERN.find(line))
        .map(|m| m.as_str())
        .find(|candidate| !is_excluded(candidate));

    match alternative {
        Some(candidate) => {
            debug!("Skipped excluded CNPJ {}, using {}", value, candidate);
            Ok(Some(candidate.to_string()))
        }
        None => Ok(Some(value)),
    }
}

/// The line right above the CNPJ line, if it is not blank.
fn company_name_above(lines: &[&str], cnpj_line: usize) -> Option<String> {
    let above = lines.get(cnpj_line.checked_sub(1)?)?.trim();
    (!above.is_empty()).then(|| above.to_string())
}

/// Topmost non-blank line of the window above the CNPJ line, cut at its first dash.
fn municipality_above(lines: &[&str], cnpj_line: usize) -> String {
    let start = cnpj_line.saturating_sub(MUNICIPALITY_WINDOW);
    lines[start..cnpj_line]
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .map(|line| line.split('-').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AP_TEXT: &str = "\
AUTORIZAÇÃO DE PRODUÇÃO
OS N° 2024/0456 VALOR TOTAL R$ 1.000,00
DATA EMISSÃO: 15/05/2024
CAMPANHA: Campanha Vacinação AUT. 123 MEIO: TV
PRODUTO: MS Ministério da Saúde
AUT.CLIENTE: Publicidade de Utilidade Pública
AT DE PRODUÇÃO: 001 E 002 - ver anexo
FORNECEDOR
BRASILIA - DF

AGENCIA EXEMPLO DE PUBLICIDADE S.A.
Cnpj: 12.345.678/0001-90
PEÇA: 01 - Filme 30s FORMATO: Vídeo - 30\"
PEÇA: 02 - Spot Rádio FORMATO: Áudio - 15\u{201D}";

    fn extract_ap(text: &str) -> FieldsMap {
        let mut fields = FieldsMap::new();
        extract(text, &mut fields, &ExtractionConfig::default()).unwrap();
        fields
    }

    #[test]
    fn test_ap_fields() {
        let fields = extract_ap(AP_TEXT);

        assert_eq!(fields.text(OS_NUMBER), Some("20240456"));
        assert_eq!(fields.text(ISSUE_DATE), Some("15/05/2024"));
        assert_eq!(fields.text(CAMPAIGN), Some("Campanha Vacinação"));
        assert_eq!(fields.text(PRODUCT), Some("MS"));
        assert_eq!(
            fields.text(CLIENT_AUTHORIZATION),
            Some("Publicidade de Utilidade Pública")
        );
        assert_eq!(
            fields.get(PRODUCTION_ATS),
            Some(&FieldValue::List(vec!["001".into(), "002".into()]))
        );
    }

    #[test]
    fn test_supplier_block() {
        let fields = extract_ap(AP_TEXT);

        assert_eq!(fields.text(CNPJ), Some("12.345.678/0001-90"));
        assert_eq!(fields.text(COMPANY_NAME), Some("AGENCIA EXEMPLO DE PUBLICIDADE S.A."));
        assert_eq!(fields.text(MUNICIPALITY), Some("BRASILIA"));
    }

    #[test]
    fn test_pieces_and_formats() {
        let fields = extract_ap(AP_TEXT);

        assert_eq!(fields.numbered(PIECE_PREFIX), vec!["Filme 30s", "Spot Rádio"]);
        assert_eq!(fields.numbered(FORMAT_PREFIX), vec!["30\"", "15\""]);
    }

    #[test]
    fn test_excluded_cnpj_prefix_skipped() {
        let text = "\
EMPRESA BRASIL DE COMUNICAÇÃO
Cnpj: 16.088.593/0001-10
BRASILIA - DF
RUA DAS FLORES 10
FORNECEDOR LTDA
CNPJ 98.765.432/0001-00";
        let fields = extract_ap(text);

        assert_eq!(fields.text(CNPJ), Some("98.765.432/0001-00"));
        assert_eq!(fields.text(COMPANY_NAME), Some("FORNECEDOR LTDA"));
        assert_eq!(fields.text(MUNICIPALITY), Some("BRASILIA"));
    }

    #[test]
    fn test_excluded_cnpj_kept_without_alternative() {
        let fields = extract_ap("Cnpj: 16.088.593/0001-10");

        assert_eq!(fields.text(CNPJ), Some("16.088.593/0001-10"));
        assert_eq!(fields.get(COMPANY_NAME), None);
        assert_eq!(fields.text(MUNICIPALITY), Some(""));
    }

    #[test]
    fn test_missing_cnpj() {
        let fields = extract_ap("OS N° 12");

        assert_eq!(fields.get(CNPJ), None);
        assert!(fields.contains(COMPANY_NAME));
        assert_eq!(fields.get(MUNICIPALITY), None);
    }
}
