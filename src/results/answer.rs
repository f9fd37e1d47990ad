//! Answer extraction and comparison.

use crate::models::ANSWER_DELIMITER;
use regex::Regex;
use std::sync::LazyLock;

// Negated forms come first so they win over the bare "is".
static ANSWER_IS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bthe\s+(?:final\s+)?answer\s+(?:is\s+not|isn['’]t|is)\b").unwrap()
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\$?\d+(?:,\d{3})*(?:\.\d+)?").unwrap());

static PLAIN_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:,\d{3})*(?:\.\d+)?").unwrap());

/// Absolute tolerance for numeric answer comparison.
pub const NUMERIC_TOLERANCE: f64 = 1e-4;

/// Extract the answer span from a model response.
///
/// Looks for the last "the answer is" marker, then the last `#### `, then the
/// last number in the text. A negated marker ("the answer isn't") cuts the text
/// there and the search continues before it. Returns an empty string when
/// nothing is found.
pub fn extract_text_answer(text: &str) -> String {
    let mut scope = text;
    while let Some(m) = ANSWER_IS_RE.find_iter(scope).last() {
        if !is_negated(m.as_str()) {
            return first_line(&scope[m.end()..]);
        }
        scope = &scope[..m.start()];
    }

    if let Some((_, tail)) = scope.rsplit_once(ANSWER_DELIMITER) {
        return first_line(tail);
    }

    NUMBER_RE
        .find_iter(scope)
        .last()
        .map(|m| clean_span(m.as_str()))
        .unwrap_or_default()
}

fn is_negated(marker: &str) -> bool {
    let marker = marker.to_lowercase();
    marker.ends_with("not") || marker.ends_with("n't") || marker.ends_with("n’t")
}

fn first_line(tail: &str) -> String {
    clean_span(tail.lines().find(|l| !l.trim().is_empty()).unwrap_or_default())
}

fn clean_span(span: &str) -> String {
    span.trim()
        .trim_start_matches(':')
        .trim()
        .trim_end_matches(['.', ','])
        .trim()
        .to_string()
}

/// Parse the first number in an answer, ignoring currency, thousands separators
/// and percent signs.
pub fn parse_number(answer: &str) -> Option<f64> {
    let cleaned: String = answer
        .chars()
        .filter(|c| !matches!(c, '$' | '%') && !c.is_whitespace())
        .collect();
    PLAIN_NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

/// Compare a predicted value with the gold answer.
pub fn value_matches(predicted: f64, gold: &str) -> bool {
    parse_number(gold).is_some_and(|expected| (predicted - expected).abs() < NUMERIC_TOLERANCE)
}

/// Compare a predicted answer span with the gold answer.
///
/// Numeric when both sides parse as numbers, otherwise case-insensitive text equality.
pub fn answers_match(predicted: &str, gold: &str) -> bool {
    match parse_number(predicted) {
        Some(value) if parse_number(gold).is_some() => value_matches(value, gold),
        _ => {
            let predicted = predicted.trim();
            !predicted.is_empty() && predicted.eq_ignore_ascii_case(gold.trim())
        }
    }
}
