//! Single-value field extraction by label.
//!
//! A field is located by the first label (in list order) that occurs in any
//! line; the raw value is either the rest of that line or a line below it.
//! The raw value then goes through a fixed post-processing pipeline driven
//! by [`ExtractOptions`].

use regex::Regex;
use tracing::trace;

use super::patterns::{DATE_DMY, DIGIT_RUN, NON_DIGIT_RUN};
use crate::error::ExtractionError;
use crate::models::FieldValue;

/// Restriction of the searched lines, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRange {
    /// Exactly one line; it must exist.
    Single(usize),
    /// Lines `start..=end`, clamped to the document.
    Span(usize, usize),
}

impl LineRange {
    fn select<'a>(&self, lines: &[&'a str]) -> Result<Vec<&'a str>, ExtractionError> {
        match *self {
            LineRange::Single(n) => {
                if n == 0 || n > lines.len() {
                    return Err(ExtractionError::LineRange {
                        start: n,
                        end: n,
                        available: lines.len(),
                    });
                }
                Ok(vec![lines[n - 1]])
            }
            LineRange::Span(start, end) => {
                let from = start.saturating_sub(1).min(lines.len());
                let to = end.min(lines.len()).max(from);
                Ok(lines[from..to].to_vec())
            }
        }
    }
}

/// Options controlling where a value is read and how it is cleaned.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub below: bool,
    pub below_lines: usize,
    pub skip_empty_lines: bool,
    pub check_next_line_if_empty: bool,
    pub line_range: Option<LineRange>,
    pub stop_before: Vec<String>,
    pub stop_after: Option<String>,
    pub date_only: bool,
    pub first_n_chars: Option<usize>,
    pub exclude_pattern: Option<Regex>,
    pub exclude_numbers: bool,
    pub after_dash: bool,
    pub only_numbers: bool,
    pub split_by: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            below: false,
            below_lines: 1,
            skip_empty_lines: true,
            check_next_line_if_empty: false,
            line_range: None,
            stop_before: Vec::new(),
            stop_after: None,
            date_only: false,
            first_n_chars: None,
            exclude_pattern: None,
            exclude_numbers: false,
            after_dash: false,
            only_numbers: false,
            split_by: None,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value from the line below the label.
    pub fn below(mut self) -> Self {
        self.below = true;
        self
    }

    /// Read the value `n` lines below the label.
    pub fn below_lines(mut self, n: usize) -> Self {
        self.below = true;
        self.below_lines = n;
        self
    }

    /// Accept an empty line below the label instead of skipping ahead.
    pub fn keep_empty_lines(mut self) -> Self {
        self.skip_empty_lines = false;
        self
    }

    pub fn check_next_line_if_empty(mut self) -> Self {
        self.check_next_line_if_empty = true;
        self
    }

    pub fn line(mut self, n: usize) -> Self {
        self.line_range = Some(LineRange::Single(n));
        self
    }

    pub fn lines(mut self, start: usize, end: usize) -> Self {
        self.line_range = Some(LineRange::Span(start, end));
        self
    }

    /// Cut the value at each of the given markers, in order.
    pub fn stop_before<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_before = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn stop_after(mut self, marker: impl Into<String>) -> Self {
        self.stop_after = Some(marker.into());
        self
    }

    /// Return the first DD/MM/YYYY date found in the value.
    pub fn date_only(mut self) -> Self {
        self.date_only = true;
        self
    }

    pub fn first_n_chars(mut self, n: usize) -> Self {
        self.first_n_chars = Some(n);
        self
    }

    /// Delete every match of `pattern` from the value.
    pub fn exclude_pattern(mut self, pattern: &Regex) -> Self {
        self.exclude_pattern = Some(pattern.clone());
        self
    }

    /// Delete every digit run from the value.
    pub fn exclude_numbers(mut self) -> Self {
        self.exclude_numbers = true;
        self
    }

    /// Keep only the segment between the first and second dash.
    pub fn after_dash(mut self) -> Self {
        self.after_dash = true;
        self
    }

    /// Keep only the digits.
    pub fn only_numbers(mut self) -> Self {
        self.only_numbers = true;
        self
    }

    /// Split the final value on `separator` into a list.
    pub fn split_by(mut self, separator: impl Into<String>) -> Self {
        self.split_by = Some(separator.into());
        self
    }
}

/// First DD/MM/YYYY date in `text`.
pub fn extract_date(text: &str) -> Option<&str> {
    DATE_DMY.find(text).map(|m| m.as_str())
}

/// Extract a single field value.
///
/// Returns `Ok(None)` when no label occurs in the searched lines, and an
/// error only when a single-line restriction points outside the document.
pub fn extract_value(
    text: &str,
    labels: &[&str],
    options: &ExtractOptions,
) -> Result<Option<FieldValue>, ExtractionError> {
    let all_lines: Vec<&str> = text.split('\n').collect();
    let lines = match options.line_range {
        Some(range) => range.select(&all_lines)?,
        None => all_lines,
    };

    let Some(raw) = locate(&lines, labels, options) else {
        trace!("No label of {:?} found", labels);
        return Ok(None);
    };

    Ok(Some(post_process(raw, options)))
}

fn locate(lines: &[&str], labels: &[&str], options: &ExtractOptions) -> Option<String> {
    for label in labels {
        for (i, line) in lines.iter().enumerate() {
            let Some(start) = line.find(label) else {
                continue;
            };
            if options.below && i + options.below_lines < lines.len() {
                return Some(value_below(lines, i, options));
            }
            return Some(line[start + label.len()..].trim().to_string());
        }
    }
    None
}

fn value_below(lines: &[&str], label_line: usize, options: &ExtractOptions) -> String {
    let mut idx = label_line + options.below_lines;
    let mut value = lines[idx].trim();

    if options.skip_empty_lines {
        while value.is_empty() && idx + 1 < lines.len() {
            idx += 1;
            value = lines[idx].trim();
        }
    }

    if options.check_next_line_if_empty && value.is_empty() && idx + 1 < lines.len() {
        value = lines[idx + 1].trim();
    }

    value.to_string()
}

fn post_process(raw: String, options: &ExtractOptions) -> FieldValue {
    let mut value = raw;

    for marker in options.stop_before.iter().filter(|m| !m.is_empty()) {
        value = cut_before(&value, marker);
    }

    if let Some(marker) = options.stop_after.as_deref().filter(|m| !m.is_empty()) {
        if let Some(idx) = value.find(marker) {
            value = value[..idx].trim().to_string();
        }
    }

    if options.date_only {
        if let Some(date) = extract_date(&value) {
            return FieldValue::Text(date.to_string());
        }
    }

    if let Some(n) = options.first_n_chars {
        let head: String = value.chars().take(n).collect();
        value = head.trim_matches(|c| c == ':' || c == ' ').trim().to_string();
    }

    if let Some(pattern) = &options.exclude_pattern {
        value = pattern.replace_all(&value, "").trim().to_string();
    }

    if options.exclude_numbers {
        value = DIGIT_RUN.replace_all(&value, "").trim().to_string();
    }

    if options.after_dash {
        value = value
            .split('-')
            .nth(1)
            .map(|segment| segment.trim().to_string())
            .unwrap_or_default();
    }

    if options.only_numbers {
        value = NON_DIGIT_RUN.replace_all(&value, "").to_string();
    }

    if let Some(separator) = options.split_by.as_deref().filter(|s| !s.is_empty()) {
        let parts = value
            .split(separator)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        return FieldValue::List(parts);
    }

    FieldValue::Text(value.trim().to_string())
}

/// Text before the first occurrence of `marker`, trimmed.
pub(crate) fn cut_before(value: &str, marker: &str) -> String {
    value
        .split(marker)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
