//! Curated country-name dictionaries.
//!
//! [`COUNTRY_NAMES`] is the primary bilingual (English/Arabic) table consulted
//! by the exact and partial strategies. Its order is significant: when a text
//! matches several keys during partial matching, the entry listed first wins.
//! GCC and wider MENA markets are listed ahead of the rest of the world.
//!
//! [`MANUAL_COUNTRY_CODES`] covers names geocoders emit for the country
//! address component that neither the primary table nor the ISO lookup know.

use std::collections::HashMap;

use crate::normalize::normalize_country;

pub const COUNTRY_NAMES: &[(&str, &str)] = &[
    // Saudi Arabia
    ("Saudi Arabia", "SA"),
    ("Kingdom of Saudi Arabia", "SA"),
    ("KSA", "SA"),
    ("Saudi", "SA"),
    ("السعودية", "SA"),
    ("المملكة العربية السعودية", "SA"),
    // United Arab Emirates
    ("United Arab Emirates", "AE"),
    ("UAE", "AE"),
    ("Emirates", "AE"),
    ("الإمارات", "AE"),
    ("الإمارات العربية المتحدة", "AE"),
    ("دولة الإمارات", "AE"),
    // Kuwait
    ("Kuwait", "KW"),
    ("State of Kuwait", "KW"),
    ("الكويت", "KW"),
    // Qatar
    ("Qatar", "QA"),
    ("قطر", "QA"),
    // Bahrain
    ("Bahrain", "BH"),
    ("البحرين", "BH"),
    // Oman
    ("Oman", "OM"),
    ("Sultanate of Oman", "OM"),
    ("عمان", "OM"),
    ("عُمان", "OM"),
    ("سلطنة عمان", "OM"),
    // Jordan
    ("Jordan", "JO"),
    ("Hashemite Kingdom of Jordan", "JO"),
    ("الأردن", "JO"),
    // Egypt
    ("Egypt", "EG"),
    ("Arab Republic of Egypt", "EG"),
    ("مصر", "EG"),
    ("جمهورية مصر العربية", "EG"),
    // Lebanon
    ("Lebanon", "LB"),
    ("لبنان", "LB"),
    // Iraq
    ("Iraq", "IQ"),
    ("العراق", "IQ"),
    // Syria
    ("Syria", "SY"),
    ("Syrian Arab Republic", "SY"),
    ("سوريا", "SY"),
    ("سورية", "SY"),
    // Palestine
    ("Palestine", "PS"),
    ("State of Palestine", "PS"),
    ("فلسطين", "PS"),
    // Yemen
    ("Yemen", "YE"),
    ("اليمن", "YE"),
    // Morocco
    ("Morocco", "MA"),
    ("المغرب", "MA"),
    // Algeria
    ("Algeria", "DZ"),
    ("الجزائر", "DZ"),
    // Tunisia
    ("Tunisia", "TN"),
    ("تونس", "TN"),
    // Libya
    ("Libya", "LY"),
    ("ليبيا", "LY"),
    // Sudan (South Sudan first so the longer name wins partial matches)
    ("South Sudan", "SS"),
    ("جنوب السودان", "SS"),
    ("Sudan", "SD"),
    ("السودان", "SD"),
    // Mauritania
    ("Mauritania", "MR"),
    ("موريتانيا", "MR"),
    // Turkey
    ("Turkey", "TR"),
    ("Türkiye", "TR"),
    ("تركيا", "TR"),
    // Iran
    ("Iran", "IR"),
    ("Islamic Republic of Iran", "IR"),
    ("إيران", "IR"),
    // United States
    ("United States", "US"),
    ("United States of America", "US"),
    ("USA", "US"),
    ("America", "US"),
    ("الولايات المتحدة", "US"),
    ("الولايات المتحدة الأمريكية", "US"),
    ("أمريكا", "US"),
    // United Kingdom
    ("United Kingdom", "GB"),
    ("UK", "GB"),
    ("Great Britain", "GB"),
    ("Britain", "GB"),
    ("England", "GB"),
    ("المملكة المتحدة", "GB"),
    ("بريطانيا", "GB"),
    // Canada
    ("Canada", "CA"),
    ("كندا", "CA"),
    // Australia
    ("Australia", "AU"),
    ("أستراليا", "AU"),
    // Germany
    ("Germany", "DE"),
    ("ألمانيا", "DE"),
    // France
    ("France", "FR"),
    ("فرنسا", "FR"),
    // Italy
    ("Italy", "IT"),
    ("إيطاليا", "IT"),
    // Spain
    ("Spain", "ES"),
    ("إسبانيا", "ES"),
    // Netherlands
    ("Netherlands", "NL"),
    ("Holland", "NL"),
    ("هولندا", "NL"),
    // Switzerland
    ("Switzerland", "CH"),
    ("سويسرا", "CH"),
    // Sweden
    ("Sweden", "SE"),
    ("السويد", "SE"),
    // Russia
    ("Russia", "RU"),
    ("Russian Federation", "RU"),
    ("روسيا", "RU"),
    // India
    ("India", "IN"),
    ("الهند", "IN"),
    // Pakistan
    ("Pakistan", "PK"),
    ("باكستان", "PK"),
    // China
    ("China", "CN"),
    ("People's Republic of China", "CN"),
    ("الصين", "CN"),
    // Japan
    ("Japan", "JP"),
    ("اليابان", "JP"),
    // South Korea
    ("South Korea", "KR"),
    ("Republic of Korea", "KR"),
    ("كوريا الجنوبية", "KR"),
    // Indonesia
    ("Indonesia", "ID"),
    ("إندونيسيا", "ID"),
    // Malaysia
    ("Malaysia", "MY"),
    ("ماليزيا", "MY"),
    // Brazil
    ("Brazil", "BR"),
    ("البرازيل", "BR"),
    // Mexico
    ("Mexico", "MX"),
    ("المكسيك", "MX"),
    // Nigeria (before Niger so the longer name wins partial matches)
    ("Nigeria", "NG"),
    ("نيجيريا", "NG"),
    ("Niger", "NE"),
    // South Africa
    ("South Africa", "ZA"),
    ("جنوب أفريقيا", "ZA"),
];

/// Secondary table for geocoder country names.
pub const MANUAL_COUNTRY_CODES: &[(&str, &str)] = &[
    ("Palestinian Territories", "PS"),
    ("Kosovo", "XK"),
    ("Taiwan", "TW"),
    ("Hong Kong", "HK"),
    ("Macau", "MO"),
    ("Macao", "MO"),
    ("Vatican City", "VA"),
    ("Western Sahara", "EH"),
    ("Ivory Coast", "CI"),
    ("Côte d'Ivoire", "CI"),
    ("Czechia", "CZ"),
    ("North Macedonia", "MK"),
    ("Eswatini", "SZ"),
    ("Myanmar (Burma)", "MM"),
    ("Cape Verde", "CV"),
    ("Cabo Verde", "CV"),
    ("Timor-Leste", "TL"),
    ("Curaçao", "CW"),
    ("Sint Maarten", "SX"),
];

/// A name table keyed by normalized country name.
///
/// Keeps insertion order for partial matching and a map for exact lookups.
/// When two names normalize to the same key, the first one listed wins.
#[derive(Debug, Clone)]
pub struct CountryDictionary {
    ordered: Vec<(String, &'static str)>,
    exact: HashMap<String, &'static str>,
}

impl CountryDictionary {
    #[must_use]
    pub fn from_entries(entries: &[(&str, &'static str)]) -> Self {
        let mut ordered = Vec::with_capacity(entries.len());
        let mut exact = HashMap::with_capacity(entries.len());

        for (name, code) in entries {
            let key = normalize_country(name);
            if key.is_empty() || exact.contains_key(&key) {
                continue;
            }
            exact.insert(key.clone(), *code);
            ordered.push((key, *code));
        }

        Self { ordered, exact }
    }

    /// The primary bilingual dictionary.
    #[must_use]
    pub fn primary() -> Self {
        Self::from_entries(COUNTRY_NAMES)
    }

    /// The secondary geocoder-name table.
    #[must_use]
    pub fn manual() -> Self {
        Self::from_entries(MANUAL_COUNTRY_CODES)
    }

    /// Exact lookup of an already-normalized key.
    #[must_use]
    pub fn exact(&self, normalized: &str) -> Option<&'static str> {
        self.exact.get(normalized).copied()
    }

    /// Word-aligned containment in either direction, first entry wins.
    ///
    /// Stricter than plain substring containment on purpose: matches must
    /// start and end on word boundaries ("omani" does not hit "oman"), and both
    /// the text and the key must be at least three characters long so that
    /// stray fragments do not match unrelated names.
    #[must_use]
    pub fn partial(&self, normalized: &str) -> Option<&'static str> {
        if normalized.chars().count() < MIN_PARTIAL_CHARS {
            return None;
        }
        let padded_text = format!(" {normalized} ");

        self.ordered
            .iter()
            .filter(|(key, _)| key.chars().count() >= MIN_PARTIAL_CHARS)
            .find(|(key, _)| {
                padded_text.contains(&format!(" {key} "))
                    || format!(" {key} ").contains(&padded_text)
            })
            .map(|(_, code)| *code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

const MIN_PARTIAL_CHARS: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    fn is_alpha2(code: &str) -> bool {
        code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
    }

    #[test]
    fn every_code_is_upper_alpha2() {
        for (name, code) in COUNTRY_NAMES.iter().chain(MANUAL_COUNTRY_CODES) {
            assert!(is_alpha2(code), "{name} maps to malformed code {code}");
        }
    }

    #[test]
    fn exact_matches_normalized_keys() {
        let dict = CountryDictionary::primary();
        assert_eq!(dict.exact("saudi arabia"), Some("SA"));
        assert_eq!(dict.exact("ksa"), Some("SA"));
        assert_eq!(dict.exact(&normalize_country("السعودية")), Some("SA"));
        assert_eq!(dict.exact("atlantis"), None);
    }

    #[test]
    fn political_variants_collapse_onto_one_key() {
        let dict = CountryDictionary::primary();
        assert_eq!(
            dict.exact(&normalize_country("Kingdom of Saudi Arabia")),
            Some("SA")
        );
        assert_eq!(
            dict.exact(&normalize_country("المملكة العربية السعودية")),
            Some("SA")
        );
    }

    #[test]
    fn partial_finds_key_inside_text() {
        let dict = CountryDictionary::primary();
        assert_eq!(dict.partial("riyadh saudi arabia"), Some("SA"));
        assert_eq!(dict.partial("دبي الامارات"), Some("AE"));
    }

    #[test]
    fn partial_finds_text_inside_key() {
        let dict = CountryDictionary::primary();
        assert_eq!(dict.partial("arab emirates"), Some("AE"));
    }

    #[test]
    fn partial_respects_word_boundaries() {
        let dict = CountryDictionary::primary();
        // "oman" must not match inside "romania", nor "niger" inside "nigeria".
        assert_eq!(dict.partial("bucharest romania"), None);
        assert_eq!(dict.partial("omani dates"), None);
        assert_eq!(dict.partial("lagos nigeria"), Some("NG"));
    }

    #[test]
    fn partial_tie_break_follows_dictionary_order() {
        let dict = CountryDictionary::primary();
        // Jordan appears first in the text, but Oman is listed first.
        assert_eq!(dict.partial("jordan oman"), Some("OM"));
        assert_eq!(dict.partial("oman jordan"), Some("OM"));
    }

    #[test]
    fn partial_ignores_short_fragments() {
        let dict = CountryDictionary::primary();
        assert_eq!(dict.partial("uk"), None);
        assert_eq!(dict.partial(""), None);
    }

    #[test]
    fn duplicate_normalized_keys_keep_first_entry() {
        let dict = CountryDictionary::from_entries(&[("Oman", "OM"), ("OMAN", "XK")]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.exact("oman"), Some("OM"));
    }

    #[test]
    fn manual_table_covers_geocoder_names() {
        let dict = CountryDictionary::manual();
        assert_eq!(dict.exact(&normalize_country("Myanmar (Burma)")), Some("MM"));
        assert_eq!(dict.exact(&normalize_country("Côte d'Ivoire")), Some("CI"));
    }
}
