use crate::market::domain::Seniority;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered marker rules, first match wins. Senior markers come before
/// junior ones, so a `Senior Associate` lands on the senior side.
const RULES: &[(&str, Seniority)] = &[
    (r"\b(senior|sr|lead|principal|staff)\b", Seniority::Senior),
    (r"\b(junior|jr|entry|associate|intern)\b", Seniority::Junior),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, Seniority)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|&(pattern, level)| (Regex::new(pattern).unwrap(), level))
        .collect()
});

/// Classifies a job title into a seniority level. Titles with no marker
/// default to mid; blank titles are unknown.
pub fn classify_seniority(title: &str) -> Seniority {
    let norm = normalized(title);
    if norm.is_empty() {
        return Seniority::Unknown;
    }
    COMPILED_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&norm))
        .map(|&(_, level)| level)
        .unwrap_or(Seniority::Mid)
}

fn normalized(s: &str) -> String {
    s.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric(), " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
