//! OS (order) field tables, one per layout.

use super::FieldRule;
use crate::extraction::field::ExtractOptions;
use crate::extraction::patterns::DATE_DMY;

pub const OS_NUMBER: &str = "OS N°";
pub const START_DATE: &str = "DATA DE INICIO";
pub const TITLE: &str = "TITULO DA OS";
pub const ORGAN: &str = "ORGAO";
pub const CAMPAIGN_TYPE: &str = "TIPO DA CAMPANHA";

/// E-mail based layout.
pub const OS1_RULES: &[FieldRule] = &[
    FieldRule {
        name: OS_NUMBER,
        labels: &["OS Nº", "OS N°"],
        options: || ExtractOptions::new().only_numbers(),
    },
    FieldRule {
        name: START_DATE,
        labels: &["DATA DE INICIO:", "DATA DE INÍCIO"],
        options: || ExtractOptions::new().below().date_only(),
    },
    FieldRule {
        name: TITLE,
        labels: &["TITULO DA OS:", "TÍTULO DA OS"],
        options: || ExtractOptions::new().below().check_next_line_if_empty(),
    },
    FieldRule {
        name: ORGAN,
        labels: &["ORGAO", "ÓRGÃO"],
        options: || ExtractOptions::new().below().exclude_pattern(&DATE_DMY).after_dash(),
    },
    FieldRule {
        name: CAMPAIGN_TYPE,
        labels: &["Nº DO PROCESSO DE SELEÇÃO INTERNA:"],
        options: || ExtractOptions::new().below().stop_before([" N° "]).exclude_numbers(),
    },
];

/// Form layout.
pub const OS2_RULES: &[FieldRule] = &[
    FieldRule {
        name: OS_NUMBER,
        labels: &["OS N", "OS N°"],
        options: || ExtractOptions::new().below().only_numbers(),
    },
    FieldRule {
        name: START_DATE,
        labels: &["DATA DE INÍCIO:"],
        options: || ExtractOptions::new().below().date_only(),
    },
    FieldRule {
        name: TITLE,
        labels: &["TÍTULO DA OS:"],
        options: || ExtractOptions::new().below().check_next_line_if_empty(),
    },
    FieldRule {
        name: ORGAN,
        labels: &["ÓRGÃO"],
        options: || ExtractOptions::new().below().exclude_pattern(&DATE_DMY).after_dash(),
    },
    FieldRule {
        name: CAMPAIGN_TYPE,
        labels: &["TIPO DA CAMPANHA"],
        options: || ExtractOptions::new().below().exclude_numbers(),
    },
];
