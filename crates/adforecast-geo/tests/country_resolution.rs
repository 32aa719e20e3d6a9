//! End-to-end country resolution through the public API.

use adforecast_geo::{
    resolve_country, AddressComponent, CountryResolver, LocationQuery, MatchStrategy,
};

#[test]
fn bilingual_names_and_abbreviations_agree() {
    let resolver = CountryResolver::new();
    let pairs = [
        ("Saudi Arabia", "SA"),
        ("السعودية", "SA"),
        ("KSA", "SA"),
        ("UAE", "AE"),
        ("الإمارات العربية المتحدة", "AE"),
        ("UK", "GB"),
        ("USA", "US"),
        ("مصر", "EG"),
        ("الأردن", "JO"),
    ];
    for (text, code) in pairs {
        assert_eq!(resolver.resolve_country(text).country_code, code, "{text}");
    }
}

#[test]
fn diacritics_do_not_block_exact_matches() {
    let resolved = resolve_country("مِصْر");
    assert_eq!(resolved.country_code, "EG");
    assert_eq!(resolved.matched_strategy, MatchStrategy::ExactDictionary);
}

#[test]
fn resolution_is_deterministic() {
    let resolver = CountryResolver::new();
    for text in ["Riyadh, Saudi Arabia", "Atlantis", "", "عمان"] {
        assert_eq!(resolver.resolve_country(text), resolver.resolve_country(text));
    }
}

#[test]
fn unknown_place_never_gets_a_guessed_country() {
    for text in ["Atlantis", "", "   ", "???", "Middle Earth"] {
        let resolved = resolve_country(text);
        assert_eq!(resolved.country_code, "XX", "{text:?}");
        assert!(resolved.is_unknown());
    }
}

#[test]
fn autocomplete_result_with_components() {
    let resolver = CountryResolver::new();
    let components: Vec<AddressComponent> = serde_json::from_str(
        r#"[
            {"long_name": "Doha", "short_name": "Doha", "types": ["locality", "political"]},
            {"long_name": "Qatar", "short_name": "QA", "types": ["country", "political"]}
        ]"#,
    )
    .unwrap();
    let query = LocationQuery::new("Doha", Some("Qatar"));
    let resolved = resolver.resolve_with_components(&components, Some(&query));
    assert_eq!(resolved.country_code, "QA");
    assert_eq!(resolved.matched_strategy, MatchStrategy::AddressComponent);
}

#[test]
fn ordinary_words_and_numbers_are_not_country_codes() {
    for text in [
        "Mar del Plata",
        "Can Tho",
        "Bel Air",
        "Cafe and Bar",
        "Building 682",
        "Are you there",
    ] {
        let resolved = resolve_country(text);
        assert_eq!(resolved.country_code, "XX", "{text:?} via {:?}", resolved.matched_strategy);
    }
}

#[test]
fn country_names_inside_longer_text_still_resolve_per_word() {
    let resolved = resolve_country("Rua Augusta 100 Lisboa Portugal");
    assert_eq!(resolved.country_code, "PT");
    assert_eq!(resolved.matched_strategy, MatchStrategy::TokenizedLookup);
}
