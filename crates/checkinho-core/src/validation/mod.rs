//! Cross-document validation and verdict aggregation.

pub mod aggregate;
pub mod validator;

pub use aggregate::{aggregate, CheckScope};
pub use validator::{file_at_number, AtDocument, CrossDocumentValidator, SicafDocument, ValidationReport};
