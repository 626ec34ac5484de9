//! Reduction of check results to the overall verdict.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::extraction::normalize::normalize_piece;
use crate::models::{CheckField, CheckResult, OverallStatus};

/// Which check fields count towards the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum CheckScope {
    #[default]
    All,
    Only(BTreeSet<CheckField>),
}

impl CheckScope {
    /// Scope over the given fields; no fields means all of them.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = CheckField>,
    {
        let fields: BTreeSet<CheckField> = fields.into_iter().collect();
        if fields.is_empty() {
            Self::All
        } else {
            Self::Only(fields)
        }
    }

    pub fn includes(&self, field: CheckField) -> bool {
        match self {
            Self::All => true,
            Self::Only(fields) => fields.contains(&field),
        }
    }
}

/// OK only when every in-scope check is OK and every required piece was found.
///
/// Pieces are compared trimmed and upper-cased. The piece comparison is not
/// affected by the scope.
pub fn aggregate(
    checks: &[CheckResult],
    required_pieces: &BTreeSet<String>,
    found_pieces: &BTreeSet<String>,
    scope: &CheckScope,
) -> OverallStatus {
    let failing = checks
        .iter()
        .filter(|check| scope.includes(check.kind.field()))
        .filter(|check| !check.status.is_ok())
        .count();

    let required: BTreeSet<String> = required_pieces.iter().map(|p| normalize_piece(p)).collect();
    let found: BTreeSet<String> = found_pieces.iter().map(|p| normalize_piece(p)).collect();
    let pieces_match = required == found;

    debug!(
        "Aggregating: {} failing checks, pieces match: {}",
        failing, pieces_match
    );

    if failing == 0 && pieces_match {
        OverallStatus::Ok
    } else {
        OverallStatus::Nc
    }
}
