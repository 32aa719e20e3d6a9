//! Industry classification from keywords and site URL.
//!
//! Rules are evaluated strictly in priority order and the first match wins;
//! there is no scoring across multiple matching rules.

use adforecast_core::{IndustryRuleConfig, IndustryRulesFile};
use adforecast_geo::normalize_site_url;
use regex::{Regex, RegexBuilder};

use crate::error::EstimateError;

pub const DEFAULT_INDUSTRY_LABEL: &str = "General Business";
pub const DEFAULT_INDUSTRY_MULTIPLIER: f64 = 1.0;

/// Result of classifying a corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryMatch {
    pub multiplier: f64,
    pub label: String,
}

impl IndustryMatch {
    #[must_use]
    pub fn general() -> Self {
        Self {
            multiplier: DEFAULT_INDUSTRY_MULTIPLIER,
            label: DEFAULT_INDUSTRY_LABEL.to_string(),
        }
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct IndustryRule {
    pub priority_rank: u32,
    pub pattern: Regex,
    pub multiplier: f64,
    pub label: String,
}

impl IndustryRule {
    /// Compile a rule's pattern case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidPattern`] if the pattern does not compile.
    pub fn compile(config: &IndustryRuleConfig) -> Result<Self, EstimateError> {
        let pattern = RegexBuilder::new(&config.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| EstimateError::InvalidPattern {
                label: config.label.clone(),
                source: e,
            })?;
        Ok(Self {
            priority_rank: config.priority_rank,
            pattern,
            multiplier: config.multiplier,
            label: config.label.clone(),
        })
    }
}

/// Ordered industry rule table.
#[derive(Debug, Clone)]
pub struct IndustryClassifier {
    rules: Vec<IndustryRule>,
}

impl IndustryClassifier {
    /// Compile a validated rule file. Rules are re-sorted by rank so the
    /// classifier does not depend on the caller's ordering.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn from_rules(file: &IndustryRulesFile) -> Result<Self, EstimateError> {
        let mut rules = file
            .rules
            .iter()
            .map(IndustryRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        rules.sort_by_key(|r| r.priority_rank);
        Ok(Self { rules })
    }

    /// Classifier over the rule table bundled with `adforecast-core`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled table is broken.
    pub fn bundled() -> Result<Self, EstimateError> {
        let file = adforecast_core::bundled_industry_rules()?;
        Self::from_rules(&file)
    }

    /// Classify a corpus. Falls back to "General Business" (1.0) when no
    /// rule matches.
    #[must_use]
    pub fn classify(&self, corpus: &str) -> IndustryMatch {
        let hit = self.rules.iter().find(|rule| rule.pattern.is_match(corpus));
        match hit {
            Some(rule) => {
                tracing::debug!(
                    label = rule.label.as_str(),
                    multiplier = rule.multiplier,
                    rank = rule.priority_rank,
                    "industry rule matched"
                );
                IndustryMatch {
                    multiplier: rule.multiplier,
                    label: rule.label.clone(),
                }
            }
            None => IndustryMatch::general(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[IndustryRule] {
        &self.rules
    }
}

/// Build the classification corpus: keywords joined by spaces followed by the
/// normalized site URL.
#[must_use]
pub fn build_corpus(keywords: &[String], site_url: Option<&str>) -> String {
    let mut parts: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if let Some(url) = site_url.map(normalize_site_url).filter(|u| !u.is_empty()) {
        parts.push(url);
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use adforecast_core::parse_industry_rules;

    use super::*;

    fn bundled() -> IndustryClassifier {
        IndustryClassifier::bundled().expect("bundled rules must compile")
    }

    #[test]
    fn legal_outranks_consulting() {
        let m = bundled().classify("lawyer consulting");
        assert_eq!(m.label, "Legal Services");
        let m = bundled().classify("business consulting for lawyers");
        assert_eq!(m.label, "Legal Services");
    }

    #[test]
    fn consulting_alone_matches_consulting() {
        let m = bundled().classify("management consulting");
        assert_eq!(m.label, "Consulting & Business Services");
    }

    #[test]
    fn no_match_returns_general_business() {
        let m = bundled().classify("handmade pottery");
        assert_eq!(m, IndustryMatch::general());
        assert!((m.multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_corpus_returns_general_business() {
        assert_eq!(bundled().classify(""), IndustryMatch::general());
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(bundled().classify("CAR INSURANCE QUOTES").label, "Insurance");
    }

    #[test]
    fn word_boundaries_prevent_false_positives() {
        // "illegal" must not trigger the legal rule
        let m = bundled().classify("illegal parking");
        assert_ne!(m.label, "Legal Services");
    }

    #[test]
    fn arabic_keywords_match() {
        assert_eq!(bundled().classify("مكتب محاماة").label, "Legal Services");
        assert_eq!(bundled().classify("عيادة اسنان").label, "Healthcare & Medical");
    }

    #[test]
    fn first_rule_by_rank_wins_regardless_of_file_order() {
        let yaml = r"
rules:
  - { priority_rank: 2, label: Broad, multiplier: 1.1, pattern: 'service' }
  - { priority_rank: 1, label: Specific, multiplier: 2.0, pattern: 'tax service' }
";
        let file = parse_industry_rules(yaml).unwrap();
        let classifier = IndustryClassifier::from_rules(&file).unwrap();
        assert_eq!(classifier.classify("tax service").label, "Specific");
        assert_eq!(classifier.classify("cleaning service").label, "Broad");
    }

    #[test]
    fn invalid_pattern_is_reported_with_label() {
        let yaml =
            "rules:\n  - { priority_rank: 1, label: Broken, multiplier: 1.0, pattern: '(' }\n";
        let file = parse_industry_rules(yaml).unwrap();
        let err = IndustryClassifier::from_rules(&file).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidPattern { ref label, .. } if label == "Broken"
        ));
    }

    #[test]
    fn corpus_joins_keywords_and_normalized_url() {
        let corpus = build_corpus(
            &["  Divorce Lawyer ".to_owned(), String::new()],
            Some("https://www.Example-Law.com/"),
        );
        assert_eq!(corpus, "divorce lawyer example-law.com");
    }

    #[test]
    fn corpus_url_can_drive_classification() {
        let corpus = build_corpus(&[], Some("https://best-insurance.example"));
        assert_eq!(bundled().classify(&corpus).label, "Insurance");
    }
}
