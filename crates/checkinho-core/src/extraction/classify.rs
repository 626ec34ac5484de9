//! Layout detection for OS and SICAF documents.

use tracing::debug;

use super::normalize::fold_accents;
use crate::models::DocumentSubtype;

/// Marker printed only on e-mail based OS forms.
const OS1_MARKER: &str = "E-mail de Leiaute";

/// Pick the OS layout: `Os1` when the e-mail form marker is present, `Os2` otherwise.
pub fn classify_os(text: &str) -> DocumentSubtype {
    let subtype = if text.contains(OS1_MARKER) {
        DocumentSubtype::Os1
    } else {
        DocumentSubtype::Os2
    };
    debug!("Classified OS as {}", subtype);
    subtype
}

/// Pick the SICAF layout: `Sicaf1` for the "Relatório" report form, `Sicaf2` otherwise.
///
/// The marker is matched after accent folding, so "Relatório" and "RELATÓRIO"
/// are both recognized.
pub fn classify_sicaf(text: &str) -> DocumentSubtype {
    let folded = fold_accents(text);
    let subtype = if folded.contains("Relatorio") || folded.contains("RELATORIO") {
        DocumentSubtype::Sicaf1
    } else {
        DocumentSubtype::Sicaf2
    };
    debug!("Classified SICAF as {}", subtype);
    subtype
}
