//! Extraction of fields that occur many times (pieces and formats).

use regex::{Regex, RegexBuilder};
use tracing::trace;

use super::field::cut_before;
use super::normalize::normalize_quotes;
use super::patterns::{PIECE_SUFFIX_SPACED, PIECE_SUFFIX_TIGHT};

/// Category-specific clean-up, selected by the label being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelCategory {
    Piece,
    Format,
}

/// Upper-case label fragments and the category they select.
const LABEL_CATEGORIES: &[(&str, LabelCategory)] = &[
    ("PECA", LabelCategory::Piece),
    ("PEÇA", LabelCategory::Piece),
    ("FORMATO", LabelCategory::Format),
];

fn categorize(label: &str) -> Option<LabelCategory> {
    let upper = label.to_uppercase();
    LABEL_CATEGORIES
        .iter()
        .find(|(fragment, _)| upper.contains(fragment))
        .map(|(_, category)| *category)
}

/// Options for [`extract_values`].
#[derive(Debug, Clone)]
pub struct RepeatedOptions {
    pub line_range: Option<(usize, usize)>,
    pub stop_before: Vec<String>,
    pub below: bool,
    pub below_lines: usize,
    pub after_dash: bool,
    pub exclude_pattern: Option<Regex>,
    pub avoid_duplicates_for_formato: bool,
}

impl Default for RepeatedOptions {
    fn default() -> Self {
        Self {
            line_range: None,
            stop_before: Vec::new(),
            below: false,
            below_lines: 1,
            after_dash: false,
            exclude_pattern: None,
            avoid_duplicates_for_formato: true,
        }
    }
}

impl RepeatedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(mut self, start: usize, end: usize) -> Self {
        self.line_range = Some((start, end));
        self
    }

    pub fn stop_before<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_before = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn below(mut self) -> Self {
        self.below = true;
        self
    }

    pub fn below_lines(mut self, n: usize) -> Self {
        self.below = true;
        self.below_lines = n;
        self
    }

    pub fn after_dash(mut self) -> Self {
        self.after_dash = true;
        self
    }

    pub fn exclude_pattern(mut self, pattern: &Regex) -> Self {
        self.exclude_pattern = Some(pattern.clone());
        self
    }

    /// Keep repeated format values.
    pub fn allow_duplicate_formats(mut self) -> Self {
        self.avoid_duplicates_for_formato = false;
        self
    }
}

/// Collect every value of a repeated field.
///
/// Every line containing a label (case-sensitive) contributes one value,
/// labels in list order and lines in document order. Lines whose raw value
/// is empty are skipped.
pub fn extract_values(text: &str, labels: &[&str], options: &RepeatedOptions) -> Vec<String> {
    let all_lines: Vec<&str> = text.split('\n').collect();
    let lines: &[&str] = match options.line_range {
        Some((start, end)) => {
            let from = start.saturating_sub(1).min(all_lines.len());
            let to = end.min(all_lines.len()).max(from);
            &all_lines[from..to]
        }
        None => &all_lines,
    };

    let mut values: Vec<String> = Vec::new();

    for label in labels {
        let category = categorize(label);
        let suffix_matcher = label_matcher(label);

        for (i, line) in lines.iter().enumerate() {
            if !line.contains(label) {
                continue;
            }

            let raw = if options.below && i + options.below_lines < lines.len() {
                lines[i + options.below_lines].trim().to_string()
            } else {
                suffix_after(line, label, suffix_matcher.as_ref())
            };

            if raw.is_empty() {
                continue;
            }

            let value = clean_value(&raw, category, options);

            if category == Some(LabelCategory::Format)
                && options.avoid_duplicates_for_formato
                && values.contains(&value)
            {
                continue;
            }

            trace!("{} -> {:?}", label, value);
            values.push(value);
        }
    }

    values
}

fn label_matcher(label: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(label))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Text after the first case-insensitive occurrence of the label, trimmed.
fn suffix_after(line: &str, label: &str, matcher: Option<&Regex>) -> String {
    let end = match matcher.and_then(|re| re.find(line)) {
        Some(m) => m.end(),
        None => line.find(label).map(|i| i + label.len()).unwrap_or(line.len()),
    };
    line[end..].trim().to_string()
}

fn clean_value(raw: &str, category: Option<LabelCategory>, options: &RepeatedOptions) -> String {
    let mut value = normalize_quotes(raw);

    for marker in options.stop_before.iter().filter(|m| !m.is_empty()) {
        value = cut_before(&value, marker);
    }

    match category {
        Some(LabelCategory::Piece) => {
            value = PIECE_SUFFIX_TIGHT.replace_all(&value, "").trim().to_string();
            value = PIECE_SUFFIX_SPACED.replace_all(&value, "").trim().to_string();
            value = cut_before(&value, "FORMATO");
        }
        Some(LabelCategory::Format) => {
            if let Some(second) = value.split('-').nth(1) {
                value = second.trim().to_string();
            }
        }
        None => {}
    }

    if let Some(pattern) = &options.exclude_pattern {
        value = pattern.replace_all(&value, "").trim().to_string();
    }

    if options.after_dash {
        if let Some(second) = value.split('-').nth(1) {
            value = second.trim().to_string();
        }
    }

    value
}
