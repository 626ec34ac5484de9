//! Data models shared across the pipeline.

pub mod check;
pub mod config;
pub mod document;
pub mod fields;

pub use check::{CheckField, CheckKind, CheckResult, CheckStatus, OverallStatus, Verdict};
pub use config::CheckinhoConfig;
pub use document::{DocumentSet, DocumentSubtype, DocumentType, RawDocument};
pub use fields::{DocumentFields, FieldValue, FieldsMap};
