//! Source documents of a validation run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four document roles reconciled in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    /// Order (Ordem de Serviço).
    #[serde(rename = "OS")]
    Os,
    /// Authorization (Autorização de Produção).
    #[serde(rename = "AP")]
    Ap,
    /// Art/production ticket.
    #[serde(rename = "AT")]
    At,
    /// Supplier registration record.
    #[serde(rename = "SICAF")]
    Sicaf,
}

impl DocumentType {
    /// Short uppercase code used in reports and file names.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Os => "OS",
            Self::Ap => "AP",
            Self::At => "AT",
            Self::Sicaf => "SICAF",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OS" => Ok(Self::Os),
            "AP" => Ok(Self::Ap),
            "AT" => Ok(Self::At),
            "SICAF" => Ok(Self::Sicaf),
            other => Err(format!("unknown document type: {other}")),
        }
    }
}

/// Layout variant of a document, selecting its extraction table.
///
/// Only OS and SICAF documents have variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentSubtype {
    #[serde(rename = "OS1")]
    Os1,
    #[serde(rename = "OS2")]
    Os2,
    #[serde(rename = "SICAF1")]
    Sicaf1,
    #[serde(rename = "SICAF2")]
    Sicaf2,
}

impl fmt::Display for DocumentSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Os1 => "OS1",
            Self::Os2 => "OS2",
            Self::Sicaf1 => "SICAF1",
            Self::Sicaf2 => "SICAF2",
        };
        f.write_str(name)
    }
}

/// Plain text of one uploaded document, as produced by a text extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Role of the document in the run.
    pub document_type: DocumentType,

    /// Extracted UTF-8 text.
    pub text: String,

    /// Where the text came from (usually a file path).
    pub source: String,
}

impl RawDocument {
    pub fn new(document_type: DocumentType, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            document_type,
            text: text.into(),
            source: source.into(),
        }
    }

    /// File name component of the source identifier.
    pub fn file_name(&self) -> &str {
        self.source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source)
    }
}

/// The documents supplied for one validation run.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    pub os: Option<RawDocument>,
    pub ap: Option<RawDocument>,
    pub ats: Vec<RawDocument>,
    pub sicaf: Option<RawDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a document in the slot of its type.
    pub fn with_document(mut self, document: RawDocument) -> Self {
        self.insert(document);
        self
    }

    /// Place a document in the slot of its type, replacing any previous OS/AP/SICAF.
    pub fn insert(&mut self, document: RawDocument) {
        match document.document_type {
            DocumentType::Os => self.os = Some(document),
            DocumentType::Ap => self.ap = Some(document),
            DocumentType::At => self.ats.push(document),
            DocumentType::Sicaf => self.sicaf = Some(document),
        }
    }

    /// The first mandatory document type that is absent, if any.
    pub fn first_missing(&self) -> Option<DocumentType> {
        if self.os.is_none() {
            Some(DocumentType::Os)
        } else if self.ap.is_none() {
            Some(DocumentType::Ap)
        } else if self.sicaf.is_none() {
            Some(DocumentType::Sicaf)
        } else {
            None
        }
    }
}
