//! Country resolution cascade.
//!
//! Tries strategies in priority order (exact dictionary, partial dictionary,
//! ISO lookup on the raw text, ISO name lookup per word) and returns the first
//! hit. When nothing matches, the result carries the `"XX"` sentinel rather
//! than a guessed country.

use std::sync::{Arc, LazyLock};

use adforecast_core::UNKNOWN_COUNTRY;
use serde::{Deserialize, Serialize};

use crate::address::{country_component, well_formed_short_code, AddressComponent};
use crate::dictionary::CountryDictionary;
use crate::iso::{CelesLookup, IsoLookup};
use crate::normalize::normalize_country;

/// Minimum token length for the per-word lookup.
const MIN_TOKEN_CHARS: usize = 3;

static DEFAULT_RESOLVER: LazyLock<CountryResolver> = LazyLock::new(CountryResolver::new);

/// Which strategy produced a [`ResolvedLocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    AddressComponent,
    ExactDictionary,
    PartialDictionary,
    IsoLookup,
    TokenizedLookup,
    ManualTable,
    Unknown,
}

/// Raw location text as captured from autocomplete or user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

impl LocationQuery {
    #[must_use]
    pub fn new(main_text: &str, secondary_text: Option<&str>) -> Self {
        Self {
            main_text: main_text.to_owned(),
            secondary_text: secondary_text.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// ISO 3166-1 alpha-2 code, or `"XX"`.
    pub country_code: String,
    pub matched_strategy: MatchStrategy,
    pub source_text: String,
}

impl ResolvedLocation {
    fn unknown(source_text: &str) -> Self {
        Self {
            country_code: UNKNOWN_COUNTRY.to_owned(),
            matched_strategy: MatchStrategy::Unknown,
            source_text: source_text.to_owned(),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.country_code == UNKNOWN_COUNTRY
    }
}

/// Resolve `text` with the process-wide default resolver.
#[must_use]
pub fn resolve_country(text: &str) -> ResolvedLocation {
    DEFAULT_RESOLVER.resolve_country(text)
}

/// Free-text to ISO country resolver.
///
/// Holds no mutable state; a single instance can be shared freely.
#[derive(Clone)]
pub struct CountryResolver {
    dictionary: CountryDictionary,
    manual: CountryDictionary,
    iso: Arc<dyn IsoLookup>,
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CountryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryResolver")
            .field("dictionary_entries", &self.dictionary.len())
            .field("manual_entries", &self.manual.len())
            .finish_non_exhaustive()
    }
}

impl CountryResolver {
    /// Resolver with the bundled dictionaries and the `celes` ISO table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_iso_lookup(CelesLookup)
    }

    /// Resolver with a custom ISO lookup for strategies 3 and 4.
    #[must_use]
    pub fn with_iso_lookup(iso: impl IsoLookup + 'static) -> Self {
        Self {
            dictionary: CountryDictionary::primary(),
            manual: CountryDictionary::manual(),
            iso: Arc::new(iso),
        }
    }

    /// Resolve free text to a country code.
    ///
    /// Never fails: empty or unrecognised text yields the `"XX"` sentinel.
    #[must_use]
    pub fn resolve_country(&self, text: &str) -> ResolvedLocation {
        match self.resolve_text(text) {
            Some((code, strategy)) => {
                tracing::debug!(text, code, ?strategy, "resolved country");
                ResolvedLocation {
                    country_code: code,
                    matched_strategy: strategy,
                    source_text: text.to_owned(),
                }
            }
            None => {
                tracing::debug!(text, "no confident country match");
                ResolvedLocation::unknown(text)
            }
        }
    }

    /// Resolve an autocomplete result.
    ///
    /// The secondary text (which usually carries the country, as in
    /// "Riyadh" / "Saudi Arabia") is tried before the main text.
    #[must_use]
    pub fn resolve_query(&self, query: &LocationQuery) -> ResolvedLocation {
        if let Some(secondary) = query.secondary_text.as_deref() {
            let resolved = self.resolve_country(secondary);
            if !resolved.is_unknown() {
                return resolved;
            }
        }
        self.resolve_country(&query.main_text)
    }

    /// Resolve using geocoder address components first, then the query text.
    ///
    /// Order: the country component's short name if it is a well-formed
    /// two-letter code; the text cascade on its long name; the manual
    /// geocoder table; finally [`Self::resolve_query`] on `query`.
    #[must_use]
    pub fn resolve_with_components(
        &self,
        components: &[AddressComponent],
        query: Option<&LocationQuery>,
    ) -> ResolvedLocation {
        if let Some(component) = country_component(components) {
            if let Some(code) = well_formed_short_code(component) {
                tracing::debug!(code, "resolved country from address component");
                return ResolvedLocation {
                    country_code: code,
                    matched_strategy: MatchStrategy::AddressComponent,
                    source_text: component.short_name.clone(),
                };
            }

            if let Some((code, strategy)) = self.resolve_text(&component.long_name) {
                tracing::debug!(
                    long_name = component.long_name,
                    code,
                    ?strategy,
                    "resolved country from component long name"
                );
                return ResolvedLocation {
                    country_code: code,
                    matched_strategy: strategy,
                    source_text: component.long_name.clone(),
                };
            }

            if let Some(code) = self.manual.exact(&normalize_country(&component.long_name)) {
                tracing::debug!(
                    long_name = component.long_name,
                    code,
                    "resolved country from manual table"
                );
                return ResolvedLocation {
                    country_code: code.to_owned(),
                    matched_strategy: MatchStrategy::ManualTable,
                    source_text: component.long_name.clone(),
                };
            }
        }

        match query {
            Some(q) => self.resolve_query(q),
            None => ResolvedLocation::unknown(""),
        }
    }

    /// Strategies 1-4. Returns `None` when every strategy misses.
    fn resolve_text(&self, text: &str) -> Option<(String, MatchStrategy)> {
        let raw = text.trim();
        if raw.is_empty() {
            return None;
        }
        let normalized = normalize_country(raw);

        // Strategy 1: exact dictionary match
        if let Some(code) = self.dictionary.exact(&normalized) {
            return Some((code.to_owned(), MatchStrategy::ExactDictionary));
        }

        // Strategy 2: partial dictionary match, first listed entry wins
        if let Some(code) = self.dictionary.partial(&normalized) {
            return Some((code.to_owned(), MatchStrategy::PartialDictionary));
        }

        // Strategy 3: ISO lookup on the raw text
        if let Some(code) = self.iso.lookup(raw) {
            return Some((code, MatchStrategy::IsoLookup));
        }

        // Strategy 4: ISO name lookup per word; codes are never matched here
        raw.split(|c: char| c.is_whitespace() || c == ',' || c == '\u{060C}')
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .find_map(|token| self.iso.lookup_token(token))
            .map(|code| (code, MatchStrategy::TokenizedLookup))
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
