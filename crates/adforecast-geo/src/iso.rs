//! External ISO 3166 lookup used by the third and fourth resolver strategies.

use celes::Country;

/// Maps a country name or code to an ISO 3166-1 alpha-2 code.
pub trait IsoLookup: Send + Sync {
    /// Lookup on a whole location string.
    ///
    /// Returns the upper-case alpha-2 code, or `None` if `text` is not a
    /// recognised country name or code.
    fn lookup(&self, text: &str) -> Option<String>;

    /// Lookup on a single word cut out of a longer location string.
    ///
    /// Words like "Can" or "Are" and house numbers like "682" collide with
    /// alpha-3 and numeric codes, so implementations should only accept
    /// names here.
    fn lookup_token(&self, token: &str) -> Option<String> {
        self.lookup(token)
    }
}

/// [`IsoLookup`] backed by the `celes` country table.
///
/// Whole strings match English names and aliases in any case, and alpha-2 or
/// alpha-3 codes only when written in upper case (`"DEU"`, not `"Deu"`).
/// Numeric codes are never accepted. Single tokens match names and aliases
/// only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelesLookup;

impl IsoLookup for CelesLookup {
    fn lookup(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        by_name(trimmed).or_else(|| by_code(trimmed))
    }

    fn lookup_token(&self, token: &str) -> Option<String> {
        by_name(token.trim())
    }
}

/// Name or alias match. `celes` keys names without spaces, so both the text
/// as given and its compacted form are tried.
fn by_name(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let compact: String = text.split_whitespace().collect();
    let found = [text, compact.as_str()].into_iter().find_map(|candidate| {
        Country::from_name(candidate)
            .or_else(|_| Country::from_alias(candidate))
            .ok()
    });
    found.and_then(alpha2)
}

fn by_code(text: &str) -> Option<String> {
    if !(2..=3).contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let country = if text.len() == 2 {
        Country::from_alpha2(text)
    } else {
        Country::from_alpha3(text)
    };
    country.ok().and_then(alpha2)
}

fn alpha2(country: Country) -> Option<String> {
    let code = country.alpha2.to_ascii_uppercase();
    (code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())).then_some(code)
}
