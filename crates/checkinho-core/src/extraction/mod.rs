//! Field extraction from document text.

pub mod catalogue;
pub mod classify;
pub mod field;
pub mod normalize;
pub mod patterns;
pub mod repeated;

pub use catalogue::{extract_fields, extract_fields_as, FieldRule};
pub use classify::{classify_os, classify_sicaf};
pub use field::{extract_date, extract_value, ExtractOptions, LineRange};
pub use repeated::{extract_values, RepeatedOptions};
