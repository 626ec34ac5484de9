//! Configuration structures for the validation pipeline.

use serde::{Deserialize, Serialize};

use super::check::CheckField;

/// Main configuration for checkinho.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckinhoConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Check selection configuration.
    pub validation: ValidationConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length below which a document is reported as text-less.
    pub min_text_length: usize,

    /// Insert a space after `Formato:` when it is glued to its value.
    pub space_after_format_label: bool,

    /// Remove blank lines from extracted text.
    pub drop_blank_lines: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            space_after_format_label: true,
            drop_blank_lines: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// CNPJ prefixes that never identify the AP supplier (the issuer's own).
    pub excluded_cnpj_prefixes: Vec<String>,

    /// Re-extract the AP with the alternate strategy when its key fields are missing.
    pub retry_ap_with_alternate_strategy: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excluded_cnpj_prefixes: vec!["16.088.593".to_string()],
            retry_ap_with_alternate_strategy: true,
        }
    }
}

/// Check selection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fields whose checks count towards the verdict (empty = all).
    pub checks: Vec<CheckField>,
}

impl CheckinhoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
