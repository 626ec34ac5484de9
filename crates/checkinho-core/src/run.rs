//! One validation run: classify, extract, validate and aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CheckinhoError, ExtractionError, Result};
use crate::extraction::catalogue::ap;
use crate::extraction::{classify_sicaf, extract_fields, extract_fields_as};
use crate::models::{
    CheckResult, CheckStatus, CheckinhoConfig, DocumentFields, DocumentSet, DocumentSubtype,
    DocumentType, RawDocument, Verdict,
};
use crate::validation::{aggregate, AtDocument, CheckScope, CrossDocumentValidator, SicafDocument};

/// Text extraction strategy of the document text collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStrategy {
    /// Default reading-order text.
    Plain,
    /// Raw content-stream text; the alternate strategy for AP documents.
    Stream,
    /// Space-free, blank-line-free text used for SICAF declaration layouts.
    Layout,
}

impl fmt::Display for TextStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Stream => "stream",
            Self::Layout => "layout",
        })
    }
}

impl FromStr for TextStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "stream" => Ok(Self::Stream),
            "layout" => Ok(Self::Layout),
            other => Err(format!("unknown text strategy: {other}")),
        }
    }
}

/// Source of alternative document texts.
///
/// A run starts from the texts already stored in its [`RawDocument`]s and
/// asks the provider for another rendering only when a layout needs it.
pub trait TextProvider {
    /// Produce the text of `document` with the given strategy.
    fn reextract(
        &self,
        document: &RawDocument,
        strategy: TextStrategy,
    ) -> std::result::Result<String, ExtractionError>;
}

/// Provider for runs over texts that have no backing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReextraction;

impl TextProvider for NoReextraction {
    fn reextract(
        &self,
        _document: &RawDocument,
        strategy: TextStrategy,
    ) -> std::result::Result<String, ExtractionError> {
        Err(ExtractionError::StrategyUnavailable(strategy.to_string()))
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Name of the run (usually its folder name).
    pub name: String,

    pub os: DocumentFields,
    pub ap: DocumentFields,
    pub ats: Vec<DocumentFields>,
    pub sicaf: DocumentFields,

    /// Layout detected for the SICAF.
    pub sicaf_subtype: DocumentSubtype,

    /// All check results, in report order.
    pub checks: Vec<CheckResult>,

    /// Fields that count towards the verdict.
    pub scope: CheckScope,

    /// Overall verdict.
    pub verdict: Verdict,

    /// AT numbers declared in the AP without a supplied AT.
    pub missing_at_numbers: Vec<String>,
}

impl RunOutcome {
    pub fn is_ok(&self) -> bool {
        self.verdict.status.is_ok()
    }

    /// Checks inside the run's scope.
    pub fn scoped_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks
            .iter()
            .filter(|check| self.scope.includes(check.kind.field()))
    }

    /// Number of in-scope checks with the given status.
    pub fn count(&self, status: CheckStatus) -> usize {
        self.scoped_checks().filter(|check| check.status == status).count()
    }
}

/// A validation run over one set of documents.
pub struct ValidationRun<'a> {
    name: String,
    documents: DocumentSet,
    provider: &'a dyn TextProvider,
    config: &'a CheckinhoConfig,
    scope: CheckScope,
}

impl<'a> ValidationRun<'a> {
    pub fn new(
        name: impl Into<String>,
        documents: DocumentSet,
        provider: &'a dyn TextProvider,
        config: &'a CheckinhoConfig,
    ) -> Self {
        Self {
            name: name.into(),
            documents,
            provider,
            config,
            scope: CheckScope::from_fields(config.validation.checks.iter().copied()),
        }
    }

    /// Override the configured check scope.
    pub fn with_scope(mut self, scope: CheckScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn execute(self) -> Result<RunOutcome> {
        info!("Validating {}", self.name);

        let DocumentSet {
            os: Some(os_doc),
            ap: Some(ap_doc),
            ats: at_docs,
            sicaf: Some(sicaf_doc),
        } = &self.documents
        else {
            let missing = self.documents.first_missing().unwrap_or(DocumentType::Os);
            warn!("{}: missing {} document", self.name, missing);
            return Err(CheckinhoError::MissingDocument(missing));
        };

        for document in [os_doc, ap_doc, sicaf_doc].into_iter().chain(at_docs.iter()) {
            self.warn_if_textless(document);
        }

        let os_fields = extract_fields(os_doc, &self.config.extraction);
        let ap_fields = self.extract_authorization(ap_doc);
        let at_fields: Vec<DocumentFields> = at_docs
            .iter()
            .map(|doc| extract_fields(doc, &self.config.extraction))
            .collect();

        let sicaf_subtype = classify_sicaf(&sicaf_doc.text);
        let sicaf_text = self.supplier_text(sicaf_doc, sicaf_subtype);
        let sicaf_source = RawDocument::new(DocumentType::Sicaf, sicaf_text, sicaf_doc.source.clone());
        let sicaf_fields = extract_fields_as(&sicaf_source, sicaf_subtype);

        let tickets: Vec<AtDocument<'_>> = at_fields
            .iter()
            .zip(at_docs.iter())
            .map(|(fields, doc)| AtDocument {
                fields,
                text: &doc.text,
            })
            .collect();
        let supplier = SicafDocument {
            fields: &sicaf_fields,
            text: &sicaf_source.text,
        };

        let report = CrossDocumentValidator::new(&os_fields, &ap_fields, &tickets, &supplier).run();

        let status = aggregate(
            &report.checks,
            &report.required_pieces,
            &report.found_pieces,
            &self.scope,
        );
        info!("{}: {}", self.name, status);

        let verdict = Verdict {
            status,
            required_pieces: report.required_pieces,
            found_pieces: report.found_pieces,
        };

        Ok(RunOutcome {
            name: self.name.clone(),
            os: os_fields,
            ap: ap_fields,
            ats: at_fields,
            sicaf: sicaf_fields,
            sicaf_subtype,
            checks: report.checks,
            scope: self.scope.clone(),
            verdict,
            missing_at_numbers: report.missing_at_numbers,
        })
    }

    /// AP fields, retried with the stream text when the key fields are missing.
    fn extract_authorization(&self, document: &RawDocument) -> DocumentFields {
        let fields = extract_fields(document, &self.config.extraction);

        let key_fields_missing =
            fields.fields.get(ap::OS_NUMBER).is_none() && fields.fields.get(ap::CNPJ).is_none();
        if !key_fields_missing || !self.config.extraction.retry_ap_with_alternate_strategy {
            return fields;
        }

        debug!("AP order number and CNPJ missing, retrying with stream text");
        match self.provider.reextract(document, TextStrategy::Stream) {
            Ok(text) => {
                let retry = RawDocument::new(DocumentType::Ap, text, document.source.clone());
                let retried = extract_fields(&retry, &self.config.extraction);
                if retried.fields.found_count() > fields.fields.found_count() {
                    info!(
                        "Using stream text for AP {} ({} fields found)",
                        document.file_name(),
                        retried.fields.found_count()
                    );
                    retried
                } else {
                    fields
                }
            }
            Err(e) => {
                warn!("AP re-extraction failed: {}", e);
                fields
            }
        }
    }

    /// Text searched for supplier data; the layout text for declaration SICAFs.
    fn supplier_text(&self, document: &RawDocument, subtype: DocumentSubtype) -> String {
        if subtype != DocumentSubtype::Sicaf2 {
            return document.text.clone();
        }

        match self.provider.reextract(document, TextStrategy::Layout) {
            Ok(text) => text,
            Err(e) => {
                warn!("SICAF layout re-extraction failed, using plain text: {}", e);
                document.text.clone()
            }
        }
    }

    fn warn_if_textless(&self, document: &RawDocument) {
        let length = document.text.trim().chars().count();
        if length < self.config.pdf.min_text_length {
            warn!(
                "{} {} has little or no text ({} chars)",
                document.document_type,
                document.file_name(),
                length
            );
        }
    }
}
