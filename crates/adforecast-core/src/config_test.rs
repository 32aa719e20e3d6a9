use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ADFORECAST_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "http://localhost:3000");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.cache_path, PathBuf::from("./.adforecast/cache.json"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.debounce_ms, 500);
    assert_eq!(cfg.user_agent, "adforecast/0.1 (campaign-forecast)");
    assert_eq!(cfg.language_id, 1000);
    assert_eq!(cfg.max_keywords, 10);
    assert!(cfg.industry_rules_path.is_none());
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADFORECAST_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ADFORECAST_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debounce_ms_override() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_DEBOUNCE_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.debounce_ms, 250);
}

#[test]
fn debounce_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_DEBOUNCE_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADFORECAST_DEBOUNCE_MS"),
        "expected InvalidEnvVar(ADFORECAST_DEBOUNCE_MS), got: {result:?}"
    );
}

#[test]
fn language_id_override() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_LANGUAGE_ID", "1019");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.language_id, 1019);
}

#[test]
fn max_keywords_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_MAX_KEYWORDS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADFORECAST_MAX_KEYWORDS"),
        "expected InvalidEnvVar(ADFORECAST_MAX_KEYWORDS), got: {result:?}"
    );
}

#[test]
fn api_base_url_must_be_http() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_API_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADFORECAST_API_BASE_URL"),
        "expected InvalidEnvVar(ADFORECAST_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn empty_optional_values_are_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_API_TOKEN", "");
    map.insert("ADFORECAST_INDUSTRY_RULES_PATH", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
    assert!(cfg.industry_rules_path.is_none());
}

#[test]
fn debug_redacts_api_token() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn every_config_error_variant_has_a_producer() {
    let mut map = HashMap::new();
    map.insert("ADFORECAST_DEBOUNCE_MS", "soon");
    let errors = vec![
        build_app_config(lookup_from_map(&map)).unwrap_err(),
        crate::load_industry_rules(&PathBuf::from("/nonexistent/industry_rules.yaml"))
            .unwrap_err(),
        crate::parse_industry_rules("rules: [").unwrap_err(),
        crate::parse_industry_rules(
            "rules:\n  - {priority_rank: 1, label: Legal, multiplier: 0.0, pattern: lawyer}\n",
        )
        .unwrap_err(),
    ];

    let mut seen = [false; 4];
    for err in &errors {
        // No wildcard arm: a variant without a producer fails to compile here.
        let slot = match err {
            ConfigError::InvalidEnvVar { .. } => 0,
            ConfigError::RulesFileIo { .. } => 1,
            ConfigError::RulesFileParse(_) => 2,
            ConfigError::Validation(_) => 3,
        };
        seen[slot] = true;
    }
    assert_eq!(seen, [true; 4]);
}
