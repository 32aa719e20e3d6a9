//! Text normalization applied before any dictionary or pattern matching.
//!
//! [`normalize`] is the shared base: lower-case, diacritics stripped, Arabic
//! letter variants unified, punctuation folded to single spaces.
//! [`normalize_country`] additionally drops political/administrative words so
//! that "Kingdom of Saudi Arabia" and "Saudi Arabia" compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Words dropped from country names. Arabic entries are listed in their
/// normalized spelling (Teh Marbuta already folded to Heh).
const COUNTRY_STOP_WORDS: &[&str] = &[
    "the",
    "of",
    "republic",
    "kingdom",
    "federation",
    "federal",
    "democratic",
    "islamic",
    "sultanate",
    "state",
    "principality",
    "جمهوريه",
    "الجمهوريه",
    "المملكه",
    "مملكه",
    "دوله",
    "سلطنه",
];

const TATWEEL: char = '\u{0640}';

/// Normalize free text for matching.
///
/// Never fails; empty or punctuation-only input yields an empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c) && *c != TATWEEL)
        .map(unify_letter)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a country name: [`normalize`] plus removal of political and
/// administrative words.
///
/// If every word is a stop word the plain normalized text is returned so that
/// the result is never emptier than the input warrants.
#[must_use]
pub fn normalize_country(raw: &str) -> String {
    let base = normalize(raw);
    let kept: Vec<&str> = base
        .split(' ')
        .filter(|w| !w.is_empty() && !COUNTRY_STOP_WORDS.contains(w))
        .collect();

    if kept.is_empty() {
        base
    } else {
        kept.join(" ")
    }
}

/// Reduce a site URL to a bare host and path: no scheme, no `www.`, no query
/// or fragment, no trailing slash.
#[must_use]
pub fn normalize_site_url(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let without_scheme = lower
        .split_once("://")
        .map_or(lower.as_str(), |(_, rest)| rest);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    let end = without_www.find(['?', '#']).unwrap_or(without_www.len());
    without_www[..end].trim_end_matches('/').to_string()
}

/// Fold Arabic letter variants that survive decomposition.
///
/// Hamza-carrying Alef forms decompose to bare Alef plus a combining mark
/// under NFKD; Alef Wasla does not and is mapped here.
fn unify_letter(c: char) -> char {
    match c {
        '\u{0671}' | '\u{0623}' | '\u{0625}' | '\u{0622}' => '\u{0627}',
        '\u{0649}' => '\u{064A}',
        '\u{0629}' => '\u{0647}',
        '\u{060C}' | '\u{061B}' | '\u{061F}' => ' ',
        other => other,
    }
}
