//! String clean-up shared by extraction and validation.

use super::patterns::{NON_ALNUM_SPACE, QUOTES, SOCIEDADE_ANONIMA};

/// Unify curly, prime and single quotes to a plain double quote.
pub fn normalize_quotes(text: &str) -> String {
    QUOTES.replace_all(text, "\"").into_owned()
}

/// Remove every whitespace character.
pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Remove whitespace and upper-case; the form used for containment searches.
pub fn compact_upper(text: &str) -> String {
    remove_whitespace(text).to_uppercase()
}

/// Accent-folded [`compact_upper`]; the form used for supplier text searches.
pub fn search_form(text: &str) -> String {
    compact_upper(&fold_accents(text))
}

/// Canonical form of a piece name for set comparison.
pub fn normalize_piece(piece: &str) -> String {
    piece.trim().to_uppercase()
}

/// Strip diacritics, keeping ASCII only.
///
/// Accented Latin letters map to their base letter and the ordinal
/// indicators to `o`/`a`; any other non-ASCII character is dropped.
pub fn fold_accents(text: &str) -> String {
    text.chars().filter_map(fold_char).collect()
}

fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let folded = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ª' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'º' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => return None,
    };
    Some(folded)
}

/// Canonical form of a company name ("Razão social") for equality checks.
///
/// Folds accents, upper-cases, spells out `S.A.` variants, drops punctuation
/// and finally removes all spaces.
pub fn normalize_company_name(name: &str) -> String {
    if name.trim().is_empty() {
        return String::new();
    }

    let upper = fold_accents(name).to_uppercase();
    let expanded = SOCIEDADE_ANONIMA.replace_all(&upper, "SOCIEDADE ANONIMA");
    let cleaned = NON_ALNUM_SPACE.replace_all(&expanded, "");
    remove_whitespace(&cleaned)
}
