//! Common regex patterns for OS/AP/AT/SICAF extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CNPJ (Brazilian company tax ID): DD.DDD.DDD/DDDD-DD
    pub static ref CNPJ: Regex = Regex::new(
        r"\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}"
    ).unwrap();

    // Dates as printed on every document: DD/MM/YYYY
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();

    pub static ref NON_DIGIT_RUN: Regex = Regex::new(r"\D+").unwrap();

    pub static ref COLON: Regex = Regex::new(r":").unwrap();

    // Straight, curly and prime quotes, all unified to a plain double quote
    pub static ref QUOTES: Regex = Regex::new(
        "[\u{201C}\u{201D}\u{2033}'\"\u{2018}\u{2019}]"
    ).unwrap();

    // Single-letter piece suffixes such as "-A " and "- B "
    pub static ref PIECE_SUFFIX_TIGHT: Regex = Regex::new(r"-[A-Z] ").unwrap();

    pub static ref PIECE_SUFFIX_SPACED: Regex = Regex::new(r"- [A-Z] ").unwrap();

    // AT number inside a file name
    pub static ref AT_FILE_NUMBER: Regex = Regex::new(r"AT\s*(\d+)").unwrap();

    // "S.A.", "S/A", "S A", "SA" as a standalone token
    pub static ref SOCIEDADE_ANONIMA: Regex = Regex::new(r"\bS[./]?[ ]?A\b").unwrap();

    pub static ref NON_ALNUM_SPACE: Regex = Regex::new(r"[^A-Z0-9 ]").unwrap();

    // "Formato:" glued to its value by the text extractor
    pub static ref FORMAT_LABEL_GLUED: Regex = Regex::new(r"(Formato:)(\S)").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnpj_pattern() {
        let m = CNPJ.find("Cnpj: 12.345.678/0001-90 IE: isento").unwrap();
        assert_eq!(m.as_str(), "12.345.678/0001-90");
        assert!(!CNPJ.is_match("12345678000190"));
    }

    #[test]
    fn test_at_file_number() {
        let caps = AT_FILE_NUMBER.captures("Campanha AT 015 final.pdf").unwrap();
        assert_eq!(&caps[1], "015");
        let caps = AT_FILE_NUMBER.captures("AT002.pdf").unwrap();
        assert_eq!(&caps[1], "002");
    }

    #[test]
    fn test_quotes() {
        let normalized = QUOTES.replace_all("30\u{201D} e 15\u{2033} \u{2018}x\u{2019}", "\"");
        assert_eq!(normalized, "30\" e 15\" \"x\"");
    }
}
