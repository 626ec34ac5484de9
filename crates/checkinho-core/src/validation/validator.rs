//! Cross-document checks between OS, AP, AT and SICAF fields.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::extraction::catalogue::{ap, at, os, sicaf};
use crate::extraction::normalize::{
    compact_upper, normalize_company_name, normalize_piece, normalize_quotes, search_form,
};
use crate::extraction::patterns::AT_FILE_NUMBER;
use crate::models::{CheckKind, CheckResult, CheckStatus, DocumentFields, DocumentSubtype};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// An AT's fields together with its full text, searched for pieces and formats.
#[derive(Debug, Clone, Copy)]
pub struct AtDocument<'a> {
    pub fields: &'a DocumentFields,
    pub text: &'a str,
}

/// The SICAF fields together with the text searched by the declaration layout.
#[derive(Debug, Clone, Copy)]
pub struct SicafDocument<'a> {
    pub fields: &'a DocumentFields,
    pub text: &'a str,
}

/// Checks of one run plus the piece sets needed by the aggregator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Check results in report order.
    pub checks: Vec<CheckResult>,

    /// Normalized non-empty pieces declared in the AP.
    pub required_pieces: BTreeSet<String>,

    /// Normalized pieces found in at least one referenced AT.
    pub found_pieces: BTreeSet<String>,

    /// AT numbers declared in the AP for which no AT was supplied.
    pub missing_at_numbers: Vec<String>,
}

/// Runs the three check groups over already extracted fields.
pub struct CrossDocumentValidator<'a> {
    os: &'a DocumentFields,
    ap: &'a DocumentFields,
    ats: &'a [AtDocument<'a>],
    sicaf: &'a SicafDocument<'a>,
}

impl<'a> CrossDocumentValidator<'a> {
    pub fn new(
        os: &'a DocumentFields,
        ap: &'a DocumentFields,
        ats: &'a [AtDocument<'a>],
        sicaf: &'a SicafDocument<'a>,
    ) -> Self {
        Self { os, ap, ats, sicaf }
    }

    pub fn run(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.check_order_against_authorization(&mut report.checks);
        self.check_authorization_against_tickets(&mut report);
        self.check_authorization_against_supplier(&mut report.checks);

        info!(
            "Validation finished: {} checks, {} not OK",
            report.checks.len(),
            report.checks.iter().filter(|c| !c.status.is_ok()).count()
        );
        report
    }

    // Group 1: OS vs AP.
    fn check_order_against_authorization(&self, checks: &mut Vec<CheckResult>) {
        let os_number = self.os.text(os::OS_NUMBER);
        let ap_number = self.ap.text(ap::OS_NUMBER);
        let check = if same(os_number, ap_number) {
            CheckResult::ok(CheckKind::OsNumber).with_detail(format!("OS N° {}", shown(os_number)))
        } else {
            CheckResult::non_conformity(CheckKind::OsNumber)
                .with_detail(format!("OS N° {}", shown(ap_number)))
        };
        checks.push(check);

        checks.push(guarded(CheckKind::Dates, || {
            let start = present(self.os.text(os::START_DATE));
            let issued = present(self.ap.text(ap::ISSUE_DATE));
            match (start, issued) {
                (Some(start), Some(issued)) => {
                    let start_date = parse_date(os::START_DATE, start)?;
                    let issue_date = parse_date(ap::ISSUE_DATE, issued)?;
                    Ok(CheckResult::new(
                        CheckKind::Dates,
                        CheckStatus::from_bool(issue_date > start_date),
                    ))
                }
                _ => Ok(CheckResult::non_conformity(CheckKind::Dates).with_detail("data ausente")),
            }
        }));

        checks.push(equality(
            CheckKind::TitleCampaign,
            self.os.text(os::TITLE),
            self.ap.text(ap::CAMPAIGN),
        ));

        checks.push(equality(
            CheckKind::OrganProduct,
            present(self.os.text(os::ORGAN)),
            present(self.ap.text(ap::PRODUCT)),
        ));

        checks.push(equality(
            CheckKind::CampaignType,
            self.os.text(os::CAMPAIGN_TYPE),
            self.ap.text(ap::CLIENT_AUTHORIZATION),
        ));
    }

    // Group 2: AP vs each AT.
    fn check_authorization_against_tickets(&self, report: &mut ValidationReport) {
        let declared: Vec<String> = self
            .ap
            .fields
            .get(ap::PRODUCTION_ATS)
            .map(|value| value.to_list().iter().map(|n| n.trim().to_string()).collect())
            .unwrap_or_default();

        let required: Vec<String> = self
            .ap
            .fields
            .numbered(ap::PIECE_PREFIX)
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();

        let mut formats: Vec<&str> = Vec::new();
        for format in self.ap.fields.numbered(ap::FORMAT_PREFIX) {
            if !format.is_empty() && !formats.contains(&format) {
                formats.push(format);
            }
        }

        let mut found_in: BTreeMap<&str, BTreeSet<String>> =
            required.iter().map(|p| (p.as_str(), BTreeSet::new())).collect();

        for (idx, ticket) in self.ats.iter().enumerate() {
            let at_index = idx + 1;
            let file_name = ticket.fields.file_name().to_string();

            let Some(number) = file_at_number(&file_name) else {
                debug!("No AT number in file name {}, skipped", file_name);
                continue;
            };
            if !declared.contains(&number) {
                debug!("AT {} ({}) not referenced by the AP, skipped", number, file_name);
                continue;
            }

            report.checks.push(CheckResult::ok(CheckKind::AtMembership {
                at_index,
                at_number: number.clone(),
                file_name: file_name.clone(),
            }));

            let compact_text = compact_upper(ticket.text);
            for piece in &required {
                if compact_text.contains(&compact_upper(piece)) {
                    if let Some(numbers) = found_in.get_mut(piece.as_str()) {
                        numbers.insert(number.clone());
                    }
                }
            }

            let ticket_formats = ticket.fields.fields.numbered(at::FORMAT_PREFIX);
            let quoted_text = normalize_quotes(ticket.text);
            for format in &formats {
                let matched = ticket_formats.contains(format)
                    || quoted_text.contains(&normalize_quotes(format));
                let kind = CheckKind::AtFormat {
                    at_index,
                    file_name: file_name.clone(),
                    format: format.to_string(),
                };
                report.checks.push(
                    CheckResult::new(kind, CheckStatus::from_bool(matched))
                        .with_detail(format!("Formato {format}")),
                );
            }

            let kind = CheckKind::AtDate {
                at_index,
                file_name: file_name.clone(),
            };
            report.checks.push(guarded(kind.clone(), || {
                let issued = present(self.ap.text(ap::ISSUE_DATE));
                let produced = present(ticket.fields.text(at::DATE));
                match (issued, produced) {
                    (Some(issued), Some(produced)) => {
                        let issue_date = parse_date(ap::ISSUE_DATE, issued)?;
                        let at_date = parse_date(at::DATE, produced)?;
                        Ok(CheckResult::new(
                            kind.clone(),
                            CheckStatus::from_bool(issue_date >= at_date),
                        ))
                    }
                    _ => Ok(CheckResult::non_conformity(kind.clone()).with_detail("data ausente")),
                }
            }));
        }

        for piece in &required {
            let kind = CheckKind::Piece {
                piece: piece.clone(),
            };
            let numbers = found_in.get(piece.as_str()).filter(|n| !n.is_empty());
            let check = match numbers {
                Some(numbers) => {
                    let joined: Vec<&str> = numbers.iter().map(String::as_str).collect();
                    report.found_pieces.insert(normalize_piece(piece));
                    CheckResult::ok(kind).with_detail(format!(
                        "A peça '{piece}' foi encontrada nos ATs: {}",
                        joined.join(", ")
                    ))
                }
                None => CheckResult::non_conformity(kind)
                    .with_detail(format!("A peça '{piece}' não foi encontrada em nenhum AT")),
            };
            report.checks.push(check);
        }

        report.required_pieces = required.iter().map(|p| normalize_piece(p)).collect();
        report.missing_at_numbers = self.missing_at_numbers(&declared);
    }

    /// Declared AT numbers matched by neither a file name nor an AT's own number.
    fn missing_at_numbers(&self, declared: &[String]) -> Vec<String> {
        let supplied: BTreeSet<String> = self
            .ats
            .iter()
            .flat_map(|ticket| {
                let from_file = file_at_number(ticket.fields.file_name());
                let declared_by_at = ticket.fields.text(at::AT_NUMBER).map(|n| n.trim().to_string());
                [from_file, declared_by_at]
            })
            .flatten()
            .collect();

        let mut missing: Vec<String> = Vec::new();
        for number in declared {
            if !number.is_empty() && !supplied.contains(number) && !missing.contains(number) {
                warn!("AT {} is listed in the AP but was not supplied", number);
                missing.push(number.clone());
            }
        }
        missing
    }

    // Group 3: AP vs SICAF.
    fn check_authorization_against_supplier(&self, checks: &mut Vec<CheckResult>) {
        match self.sicaf.fields.subtype {
            Some(DocumentSubtype::Sicaf2) => self.search_supplier_text(checks),
            _ => self.compare_supplier_fields(checks),
        }
    }

    fn compare_supplier_fields(&self, checks: &mut Vec<CheckResult>) {
        let ap_name = self.ap.text(ap::COMPANY_NAME).map(normalize_company_name);
        let sicaf_name = self.sicaf.fields.text(sicaf::COMPANY_NAME).map(normalize_company_name);
        checks.push(equality(
            CheckKind::CompanyName,
            sicaf_name.as_deref(),
            ap_name.as_deref(),
        ));

        checks.push(equality(
            CheckKind::Cnpj,
            self.sicaf.fields.text(sicaf::CNPJ),
            self.ap.text(ap::CNPJ),
        ));

        checks.push(equality(
            CheckKind::Municipality,
            self.sicaf.fields.text(sicaf::MUNICIPALITY),
            self.ap.text(ap::MUNICIPALITY),
        ));
    }

    fn search_supplier_text(&self, checks: &mut Vec<CheckResult>) {
        let haystack = search_form(self.sicaf.text);

        let check = match present(self.ap.text(ap::COMPANY_NAME)) {
            Some(name) if haystack.contains(&search_form(name)) => {
                CheckResult::ok(CheckKind::CompanyName)
                    .with_detail("Razão Social do AP encontrada no SICAF (sem espaços).")
            }
            Some(_) => CheckResult::non_conformity(CheckKind::CompanyName)
                .with_detail("Razão Social do AP não encontrada no SICAF."),
            None => CheckResult::non_conformity(CheckKind::CompanyName)
                .with_detail("Razão Social do AP não foi encontrada."),
        };
        checks.push(check);

        let found = |value: Option<&str>| {
            present(value).is_some_and(|v| haystack.contains(&search_form(v)))
        };

        checks.push(if found(self.ap.text(ap::CNPJ)) {
            CheckResult::ok(CheckKind::Cnpj).with_detail("CNPJ do AP encontrado no SICAF.")
        } else {
            CheckResult::non_conformity(CheckKind::Cnpj)
                .with_detail("CNPJ do AP não encontrado no SICAF.")
        });

        checks.push(if found(self.ap.text(ap::MUNICIPALITY)) {
            CheckResult::ok(CheckKind::Municipality)
                .with_detail("Município do AP encontrado no SICAF.")
        } else {
            CheckResult::non_conformity(CheckKind::Municipality)
                .with_detail("Município do AP não encontrado no SICAF.")
        });
    }
}

/// Evaluate a check, turning an evaluation error into an `Error` line.
fn guarded<F>(kind: CheckKind, check: F) -> CheckResult
where
    F: FnOnce() -> Result<CheckResult, ValidationError>,
{
    match check() {
        Ok(result) => result,
        Err(e) => {
            warn!("Check {} failed: {}", kind.id(), e);
            CheckResult::error(kind, e.to_string())
        }
    }
}

/// OK when both values are present and equal.
fn equality(kind: CheckKind, left: Option<&str>, right: Option<&str>) -> CheckResult {
    CheckResult::new(kind, CheckStatus::from_bool(same(left, right)))
}

fn same(left: Option<&str>, right: Option<&str>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn shown(value: Option<&str>) -> &str {
    value.unwrap_or("não encontrado")
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::DateParse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// AT number embedded in a file name, e.g. `002` in `AT 002.pdf`.
pub fn file_at_number(file_name: &str) -> Option<String> {
    AT_FILE_NUMBER
        .captures(file_name)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, FieldValue};
    use pretty_assertions::assert_eq;

    fn order() -> DocumentFields {
        let mut fields = DocumentFields::new(DocumentType::Os, "os.pdf").with_subtype(DocumentSubtype::Os1);
        fields.fields.insert_text(os::OS_NUMBER, "1234");
        fields.fields.insert_text(os::START_DATE, "01/05/2024");
        fields.fields.insert_text(os::TITLE, "Inverno");
        fields.fields.insert_text(os::ORGAN, "MS");
        fields.fields.insert_text(os::CAMPAIGN_TYPE, "Utilidade");
        fields
    }

    fn authorization() -> DocumentFields {
        let mut fields = DocumentFields::new(DocumentType::Ap, "ap.pdf");
        fields.fields.insert_text(ap::OS_NUMBER, "1234");
        fields.fields.insert_text(ap::ISSUE_DATE, "10/05/2024");
        fields.fields.insert_text(ap::CAMPAIGN, "Inverno");
        fields.fields.insert_text(ap::PRODUCT, "MS");
        fields.fields.insert_text(ap::CLIENT_AUTHORIZATION, "Utilidade");
        fields.fields.insert(
            ap::PRODUCTION_ATS,
            Some(FieldValue::List(vec!["001".into(), "002".into()])),
        );
        fields.fields.insert_text(ap::CNPJ, "12.345.678/0001-90");
        fields.fields.insert_text(ap::COMPANY_NAME, "Agência Exemplo S.A.");
        fields.fields.insert_text(ap::MUNICIPALITY, "BRASILIA");
        fields.fields.insert_text("PECA1", "Filme 30s");
        fields.fields.insert_text("PECA2", "Spot Rádio");
        fields.fields.insert_text("FORMATO1", "30\"");
        fields
    }

    fn ticket(source: &str, date: &str) -> DocumentFields {
        let mut fields = DocumentFields::new(DocumentType::At, source);
        fields.fields.insert_text(at::DATE, date);
        fields
    }

    fn supplier(subtype: DocumentSubtype) -> DocumentFields {
        let mut fields = DocumentFields::new(DocumentType::Sicaf, "sicaf.pdf").with_subtype(subtype);
        if subtype == DocumentSubtype::Sicaf1 {
            fields.fields.insert_text(sicaf::COMPANY_NAME, "AGENCIA EXEMPLO SA");
            fields.fields.insert_text(sicaf::CNPJ, "12.345.678/0001-90");
            fields.fields.insert_text(sicaf::MUNICIPALITY, "BRASILIA");
        }
        fields
    }

    fn status_of(report: &ValidationReport, id: &str) -> Vec<CheckStatus> {
        report
            .checks
            .iter()
            .filter(|c| c.id() == id)
            .map(|c| c.status)
            .collect()
    }

    #[test]
    fn test_group_one_ok() {
        let (os_fields, ap_fields) = (order(), authorization());
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        for id in ["1.1", "1.2", "1.3", "1.4", "1.5"] {
            assert_eq!(status_of(&report, id), vec![CheckStatus::Ok], "check {id}");
        }
        assert_eq!(report.checks[0].detail, "OS N° 1234");
    }

    #[test]
    fn test_dates_equal_is_nonconformity() {
        let os_fields = order();
        let mut ap_fields = authorization();
        ap_fields.fields.insert_text(ap::ISSUE_DATE, "01/05/2024");
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "1.2"), vec![CheckStatus::NonConformity]);
    }

    #[test]
    fn test_unparseable_date_is_error() {
        let mut os_fields = order();
        os_fields.fields.insert_text(os::START_DATE, "31/02/2024");
        let ap_fields = authorization();
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "1.2"), vec![CheckStatus::Error]);
        // Remaining checks still run.
        assert_eq!(status_of(&report, "1.3"), vec![CheckStatus::Ok]);
    }

    #[test]
    fn test_missing_values_are_nonconformity() {
        let mut os_fields = order();
        let mut ap_fields = authorization();
        os_fields.fields.insert(os::OS_NUMBER, None);
        ap_fields.fields.insert(ap::OS_NUMBER, None);
        os_fields.fields.insert(os::ORGAN, None);
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "1.1"), vec![CheckStatus::NonConformity]);
        assert_eq!(status_of(&report, "1.4"), vec![CheckStatus::NonConformity]);
    }

    #[test]
    fn test_pieces_found_across_ats() {
        let (os_fields, ap_fields) = (order(), authorization());
        let first = ticket("lote/AT 001.pdf", "09/05/2024");
        let second = ticket("lote/AT002.pdf", "11/05/2024");
        let unrelated = ticket("lote/AT 009.pdf", "01/01/2024");
        let ats = [
            AtDocument { fields: &first, text: "PEÇA: FILME  30S\nFormato 30\u{201D}" },
            AtDocument { fields: &unrelated, text: "Spot Rádio" },
            AtDocument { fields: &second, text: "Peça: spot rádio" },
        ];
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &ats, &sicaf_doc).run();

        assert_eq!(status_of(&report, "2.1.1"), vec![CheckStatus::Ok]);
        assert!(status_of(&report, "2.2.1").is_empty());
        assert_eq!(status_of(&report, "2.3.1"), vec![CheckStatus::Ok]);

        assert_eq!(status_of(&report, "2.1.3"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "2.3.3"), vec![CheckStatus::NonConformity]);

        assert_eq!(status_of(&report, "2.1.4"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "2.3.4"), vec![CheckStatus::NonConformity]);

        assert_eq!(
            status_of(&report, "2.2"),
            vec![CheckStatus::Ok, CheckStatus::Ok]
        );
        assert_eq!(report.required_pieces, report.found_pieces);
        assert!(report.missing_at_numbers.is_empty());
    }

    #[test]
    fn test_missing_at_reported() {
        let (os_fields, ap_fields) = (order(), authorization());
        let first = ticket("AT001.pdf", "09/05/2024");
        let ats = [AtDocument { fields: &first, text: "Filme 30s" }];
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &ats, &sicaf_doc).run();

        assert_eq!(report.missing_at_numbers, vec!["002"]);
        assert_eq!(
            status_of(&report, "2.2"),
            vec![CheckStatus::Ok, CheckStatus::NonConformity]
        );
        assert_ne!(report.required_pieces, report.found_pieces);
    }

    #[test]
    fn test_sicaf1_comparisons() {
        let (os_fields, ap_fields) = (order(), authorization());
        let sicaf_fields = supplier(DocumentSubtype::Sicaf1);
        let sicaf_doc = SicafDocument { fields: &sicaf_fields, text: "" };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "3.1"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.2"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.3"), vec![CheckStatus::Ok]);
    }

    #[test]
    fn test_sicaf2_text_search() {
        let (os_fields, ap_fields) = (order(), authorization());
        let sicaf_fields = supplier(DocumentSubtype::Sicaf2);
        let sicaf_doc = SicafDocument {
            fields: &sicaf_fields,
            text: "AGÊNCIAEXEMPLOS.A.\nCNPJ:12.345.678/0001-90\nGOIANIA",
        };
        let mut ap_fields = ap_fields;
        ap_fields.fields.insert_text(ap::COMPANY_NAME, "Agência Exemplo S.A.");
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "3.1"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.2"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.3"), vec![CheckStatus::NonConformity]);
    }

    #[test]
    fn test_sicaf2_search_ignores_accents() {
        let os_fields = order();
        let mut ap_fields = authorization();
        ap_fields.fields.insert_text(ap::COMPANY_NAME, "Agência Exemplo Ltda");
        ap_fields.fields.insert_text(ap::MUNICIPALITY, "Brasília");
        let sicaf_fields = supplier(DocumentSubtype::Sicaf2);
        let sicaf_doc = SicafDocument {
            fields: &sicaf_fields,
            text: "Declaracao\nAGENCIAEXEMPLOLTDA\nCNPJ 12.345.678/0001-90\nBRASILIA-DF\n",
        };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "3.1"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.2"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.3"), vec![CheckStatus::Ok]);
    }

    #[test]
    fn test_sicaf2_search_ignores_case() {
        let os_fields = order();
        let mut ap_fields = authorization();
        ap_fields.fields.insert_text(ap::MUNICIPALITY, "BRASILIA");
        let sicaf_fields = supplier(DocumentSubtype::Sicaf2);
        let sicaf_doc = SicafDocument {
            fields: &sicaf_fields,
            text: "agência exemplo s.a.\ncnpj: 12.345.678/0001-90\nmunicípio: brasília",
        };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "3.1"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.2"), vec![CheckStatus::Ok]);
        assert_eq!(status_of(&report, "3.3"), vec![CheckStatus::Ok]);
    }

    #[test]
    fn test_sicaf2_search_still_rejects_other_cnpj() {
        let (os_fields, ap_fields) = (order(), authorization());
        let sicaf_fields = supplier(DocumentSubtype::Sicaf2);
        let sicaf_doc = SicafDocument {
            fields: &sicaf_fields,
            text: "AGENCIA EXEMPLO S.A.\nCNPJ 98.765.432/0001-10\nBRASÍLIA",
        };
        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &[], &sicaf_doc).run();

        assert_eq!(status_of(&report, "3.2"), vec![CheckStatus::NonConformity]);
        assert_eq!(status_of(&report, "3.3"), vec![CheckStatus::Ok]);
    }

    #[test]
    fn test_file_at_number() {
        assert_eq!(file_at_number("AT 015 - final.pdf").as_deref(), Some("015"));
        assert_eq!(file_at_number("ap.pdf"), None);
    }
}
