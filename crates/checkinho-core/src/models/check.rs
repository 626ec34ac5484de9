//! Check results and the overall verdict.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width of the label column in rendered check lines.
const LABEL_WIDTH: usize = 40;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Non-conformity")]
    NonConformity,
    #[serde(rename = "Error")]
    Error,
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// `Ok` when the condition holds, `NonConformity` otherwise.
    pub fn from_bool(ok: bool) -> Self {
        if ok { Self::Ok } else { Self::NonConformity }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Ok => "OK",
            Self::NonConformity => "Non-conformity",
            Self::Error => "Error",
        };
        f.write_str(token)
    }
}

/// Report field a check belongs to; the unit of selective validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckField {
    OsNumber,
    Dates,
    TitleCampaign,
    OrganProduct,
    CampaignType,
    AtProduction,
    Pieces,
    AtFormat,
    AtDate,
    CompanyName,
    Cnpj,
    Municipality,
}

impl CheckField {
    pub const ALL: [CheckField; 12] = [
        Self::OsNumber,
        Self::Dates,
        Self::TitleCampaign,
        Self::OrganProduct,
        Self::CampaignType,
        Self::AtProduction,
        Self::Pieces,
        Self::AtFormat,
        Self::AtDate,
        Self::CompanyName,
        Self::Cnpj,
        Self::Municipality,
    ];

    /// Name of the field as shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OsNumber => "OS N°",
            Self::Dates => "DATAS",
            Self::TitleCampaign => "TITULO DA OS/CAMPANHA",
            Self::OrganProduct => "ORGAO/PRODUTO",
            Self::CampaignType => "TIPO DA CAMPANHA/AUT.CLIENTE",
            Self::AtProduction => "AT /AT DE PRODUCAO",
            Self::Pieces => "PEÇAS",
            Self::AtFormat => "AT FORMATO/FORMATO",
            Self::AtDate => "DATA EMISSAO/Data da AT",
            Self::CompanyName => "Razão social",
            Self::Cnpj => "CNPJ",
            Self::Municipality => "Município",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::OsNumber => "os_number",
            Self::Dates => "dates",
            Self::TitleCampaign => "title_campaign",
            Self::OrganProduct => "organ_product",
            Self::CampaignType => "campaign_type",
            Self::AtProduction => "at_production",
            Self::Pieces => "pieces",
            Self::AtFormat => "at_format",
            Self::AtDate => "at_date",
            Self::CompanyName => "company_name",
            Self::Cnpj => "cnpj",
            Self::Municipality => "municipality",
        }
    }
}

impl fmt::Display for CheckField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CheckField {
    type Err = String;

    /// Accepts either the snake_case key or the report label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s) || field.label() == s)
            .ok_or_else(|| format!("unknown check field: {s}"))
    }
}

/// Identity of a check, carrying the numbering of the report.
///
/// `at_index` is the 1-based position of the AT file among all AT files
/// supplied for the run, including those the AP does not reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckKind {
    /// 1.1
    OsNumber,
    /// 1.2
    Dates,
    /// 1.3
    TitleCampaign,
    /// 1.4
    OrganProduct,
    /// 1.5
    CampaignType,
    /// 2.i.1
    AtMembership {
        at_index: usize,
        at_number: String,
        file_name: String,
    },
    /// 2.2
    Piece { piece: String },
    /// 2.i.3
    AtFormat {
        at_index: usize,
        file_name: String,
        format: String,
    },
    /// 2.i.4
    AtDate { at_index: usize, file_name: String },
    /// 3.1
    CompanyName,
    /// 3.2
    Cnpj,
    /// 3.3
    Municipality,
}

impl CheckKind {
    /// Dotted check identifier, e.g. `1.2` or `2.3.4`.
    pub fn id(&self) -> String {
        match self {
            Self::OsNumber => "1.1".to_string(),
            Self::Dates => "1.2".to_string(),
            Self::TitleCampaign => "1.3".to_string(),
            Self::OrganProduct => "1.4".to_string(),
            Self::CampaignType => "1.5".to_string(),
            Self::AtMembership { at_index, .. } => format!("2.{at_index}.1"),
            Self::Piece { .. } => "2.2".to_string(),
            Self::AtFormat { at_index, .. } => format!("2.{at_index}.3"),
            Self::AtDate { at_index, .. } => format!("2.{at_index}.4"),
            Self::CompanyName => "3.1".to_string(),
            Self::Cnpj => "3.2".to_string(),
            Self::Municipality => "3.3".to_string(),
        }
    }

    pub fn field(&self) -> CheckField {
        match self {
            Self::OsNumber => CheckField::OsNumber,
            Self::Dates => CheckField::Dates,
            Self::TitleCampaign => CheckField::TitleCampaign,
            Self::OrganProduct => CheckField::OrganProduct,
            Self::CampaignType => CheckField::CampaignType,
            Self::AtMembership { .. } => CheckField::AtProduction,
            Self::Piece { .. } => CheckField::Pieces,
            Self::AtFormat { .. } => CheckField::AtFormat,
            Self::AtDate { .. } => CheckField::AtDate,
            Self::CompanyName => CheckField::CompanyName,
            Self::Cnpj => CheckField::Cnpj,
            Self::Municipality => CheckField::Municipality,
        }
    }

    /// Fixed human-readable label for the report's first column.
    pub fn label(&self) -> String {
        match self {
            Self::AtMembership {
                at_number,
                file_name,
                ..
            } => format!("AT {at_number} - ({file_name}) /AT DE PRODUCAO"),
            Self::Piece { .. } => "PEÇA".to_string(),
            Self::AtFormat { file_name, .. } => format!("AT - ({file_name}) FORMATO/FORMATO"),
            other => other.field().label().to_string(),
        }
    }
}

/// Result of one cross-document check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Which check produced this result.
    pub kind: CheckKind,

    /// Outcome.
    pub status: CheckStatus,

    /// Free-form explanation (may be empty).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl CheckResult {
    pub fn new(kind: CheckKind, status: CheckStatus) -> Self {
        Self {
            kind,
            status,
            detail: String::new(),
        }
    }

    pub fn ok(kind: CheckKind) -> Self {
        Self::new(kind, CheckStatus::Ok)
    }

    pub fn non_conformity(kind: CheckKind) -> Self {
        Self::new(kind, CheckStatus::NonConformity)
    }

    pub fn error(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Error).with_detail(detail)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Dotted identifier of the check.
    pub fn id(&self) -> String {
        self.kind.id()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind.label();
        let pad = LABEL_WIDTH.saturating_sub(label.chars().count()).max(1);
        write!(
            f,
            "{label}{:pad$}CHECK {}: {}",
            "",
            self.kind.id(),
            self.status,
            pad = pad
        )?;
        if !self.detail.is_empty() {
            write!(f, " - {}", self.detail)?;
        }
        Ok(())
    }
}

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NC")]
    Nc,
}

impl OverallStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Outcome category used for destination folders.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Nc => "Non-conformity",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Nc => "NC",
        })
    }
}

/// Final verdict of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// OK or NC.
    pub status: OverallStatus,

    /// Normalized pieces declared in the AP.
    pub required_pieces: BTreeSet<String>,

    /// Normalized pieces located in at least one AT.
    pub found_pieces: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ids() {
        assert_eq!(CheckKind::OsNumber.id(), "1.1");
        assert_eq!(CheckKind::CampaignType.id(), "1.5");
        assert_eq!(
            CheckKind::AtFormat {
                at_index: 3,
                file_name: "AT003.pdf".into(),
                format: "30\"".into()
            }
            .id(),
            "2.3.3"
        );
        assert_eq!(
            CheckKind::AtDate {
                at_index: 2,
                file_name: "AT002.pdf".into()
            }
            .id(),
            "2.2.4"
        );
        assert_eq!(CheckKind::Municipality.id(), "3.3");
    }

    #[test]
    fn test_check_line_rendering() {
        let line = CheckResult::ok(CheckKind::OsNumber).with_detail("OS N° 1234").to_string();
        assert!(line.starts_with("OS N°"));
        assert!(line.contains("CHECK 1.1: OK - OS N° 1234"));

        let line = CheckResult::error(CheckKind::Dates, "bad date").to_string();
        assert!(line.contains("CHECK 1.2: Error - bad date"));

        let line = CheckResult::non_conformity(CheckKind::CompanyName).to_string();
        assert!(line.ends_with("CHECK 3.1: Non-conformity"));
    }

    #[test]
    fn test_check_field_parse() {
        assert_eq!("cnpj".parse::<CheckField>().unwrap(), CheckField::Cnpj);
        assert_eq!("Razão social".parse::<CheckField>().unwrap(), CheckField::CompanyName);
        assert_eq!("AT_FORMAT".parse::<CheckField>().unwrap(), CheckField::AtFormat);
        assert!("nope".parse::<CheckField>().is_err());
    }
}
