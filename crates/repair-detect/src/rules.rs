//! Field-specific value rules shared by detection, correction and
//! enrichment acceptance checks.

use std::sync::LazyLock;

use regex::Regex;

use repair_model::{CellValue, IssueKind};
use repair_reference::{ReferenceLibrary, ReferenceSet, Vocabulary, best_match};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}-\d{4}$").expect("phone regex"));

pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 120;

/// Digit counts a phone can be reformatted from.
pub const PHONE_FORMAT_DIGITS: [usize; 2] = [7, 8];
/// Plausible digit-count range for a phone after separator stripping.
pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Placeholder spellings that count as malformed name values.
pub const NAME_PLACEHOLDERS: [&str; 5] = ["nan", "n/a", "none", "null", "unknown"];

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Canonical phone rendering: NNN-NNNN or NNNN-NNNN.
pub fn is_canonical_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Strip separators; `None` when non-digit characters remain.
pub fn phone_digits(value: &str) -> Option<String> {
    let digits: String = value
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '.' | '(' | ')' | '+'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Render a digit string in the canonical phone shape, when its length
/// allows one.
pub fn format_phone(digits: &str) -> Option<String> {
    if !PHONE_FORMAT_DIGITS.contains(&digits.len()) {
        return None;
    }
    let split = digits.len() - 4;
    Some(format!("{}-{}", &digits[..split], &digits[split..]))
}

/// Phone finding for a non-missing cell.
///
/// Canonical renderings are clean. Values that reduce to 7-8 digits are
/// malformed but reformattable; 9-15 digit strings are plausible long
/// numbers and left alone; anything else (letters, implausible length)
/// is malformed with no safe fix.
pub fn phone_issue(value: &str) -> Option<IssueKind> {
    if is_canonical_phone(value) {
        return None;
    }
    match phone_digits(value) {
        Some(digits) if PHONE_FORMAT_DIGITS.contains(&digits.len()) => {
            Some(IssueKind::Malformed)
        }
        Some(digits) if (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) => None,
        _ => Some(IssueKind::Malformed),
    }
}

pub fn is_name_placeholder(value: &str) -> bool {
    NAME_PLACEHOLDERS.contains(&value.trim().to_lowercase().as_str())
}

/// Title-case every whitespace-separated word.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Integer reading of a cell, for rules over whole-number fields.
pub fn integer_value(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Number(value) if value.fract() == 0.0 => Some(*value as i64),
        CellValue::Text(value) => value.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Numeric reading of a cell.
pub fn numeric_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(value) => Some(*value),
        CellValue::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        CellValue::Missing => None,
    }
}

pub fn age_issue(cell: &CellValue) -> Option<IssueKind> {
    match integer_value(cell) {
        None => Some(IssueKind::Malformed),
        Some(age) if !(AGE_MIN..=AGE_MAX).contains(&age) => Some(IssueKind::Implausible),
        Some(_) => None,
    }
}

pub fn loyalty_issue(cell: &CellValue) -> Option<IssueKind> {
    match numeric_value(cell) {
        None => Some(IssueKind::Malformed),
        Some(points) if points < 0.0 => Some(IssueKind::Implausible),
        Some(_) => None,
    }
}

/// Country/city finding for a non-missing cell: clean when exactly
/// canonical, `NonCanonical` when a fuzzy candidate reaches the threshold,
/// `Implausible` when nothing plausible matches (never guessed).
pub fn canonical_issue(set: &ReferenceSet, value: &str, threshold: f64) -> Option<IssueKind> {
    if set.contains(value) {
        return None;
    }
    match best_match(set, value) {
        Some(matched) if matched.score >= threshold => Some(IssueKind::NonCanonical),
        _ => Some(IssueKind::Implausible),
    }
}

/// Vocabulary finding: clean only when the value already carries the
/// canonical spelling. Resolvable variants ("f", "widow") are malformed
/// but fixable; unresolvable values are malformed with no safe fix.
pub fn vocab_issue(vocab: &Vocabulary, value: &str) -> Option<IssueKind> {
    match vocab.resolve(value) {
        Some(canonical) if canonical == value => None,
        _ => Some(IssueKind::Malformed),
    }
}

pub fn name_issue(value: &str) -> Option<IssueKind> {
    if is_name_placeholder(value) || title_case(value) != value {
        Some(IssueKind::Malformed)
    } else {
        None
    }
}

/// All findings for one non-missing cell of a recognized column.
pub fn cell_issues(
    column: &str,
    cell: &CellValue,
    library: &ReferenceLibrary,
    threshold: f64,
) -> Vec<IssueKind> {
    use repair_model::fields;

    let rendered = cell.render();
    let finding = match column {
        fields::EMAIL => (!is_valid_email(&rendered)).then_some(IssueKind::Malformed),
        fields::PHONE => phone_issue(&rendered),
        fields::AGE => age_issue(cell),
        fields::LOYALTY_POINTS => loyalty_issue(cell),
        fields::GENDER => vocab_issue(&library.genders, &rendered),
        fields::MARITAL_STATUS => vocab_issue(&library.marital_statuses, &rendered),
        fields::COUNTRY => canonical_issue(&library.countries, &rendered, threshold),
        fields::CITY => canonical_issue(&library.cities, &rendered, threshold),
        _ if fields::is_name_column(column) => name_issue(&rendered),
        _ => None,
    };
    finding.into_iter().collect()
}
