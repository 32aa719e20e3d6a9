//! Loading and validation of the industry CPC rule table.
//!
//! The table ships with the crate (`config/industry_rules.yaml`) and can be
//! replaced by a file on disk. Pattern compilation is left to the classifier;
//! this module only checks the shape of the data.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BUNDLED_RULES: &str = include_str!("../config/industry_rules.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRuleConfig {
    /// Lower ranks are evaluated first.
    pub priority_rank: u32,
    pub label: String,
    pub multiplier: f64,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryRulesFile {
    pub rules: Vec<IndustryRuleConfig>,
}

/// Parse and validate the rule table bundled with the crate.
///
/// # Errors
///
/// Returns `ConfigError` only if the bundled resource is broken.
pub fn bundled_industry_rules() -> Result<IndustryRulesFile, ConfigError> {
    parse_industry_rules(BUNDLED_RULES)
}

/// Load and validate an industry rule table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_industry_rules(path: &Path) -> Result<IndustryRulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_industry_rules(&content)
}

/// Parse a YAML rule table, validate it, and sort it by priority rank.
///
/// # Errors
///
/// Returns `ConfigError::RulesFileParse` for malformed YAML and
/// `ConfigError::Validation` for empty labels or patterns, non-positive
/// multipliers, or duplicate ranks.
pub fn parse_industry_rules(yaml: &str) -> Result<IndustryRulesFile, ConfigError> {
    let mut rules_file: IndustryRulesFile = serde_yaml::from_str(yaml)?;
    validate_rules(&rules_file)?;
    rules_file.rules.sort_by_key(|r| r.priority_rank);
    Ok(rules_file)
}

fn validate_rules(rules_file: &IndustryRulesFile) -> Result<(), ConfigError> {
    let mut seen_ranks = HashSet::new();

    for rule in &rules_file.rules {
        if rule.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "industry label must be non-empty".to_string(),
            ));
        }

        if rule.pattern.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "industry '{}' has an empty pattern",
                rule.label
            )));
        }

        if !rule.multiplier.is_finite() || rule.multiplier <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "industry '{}' has invalid multiplier {}; must be positive",
                rule.label, rule.multiplier
            )));
        }

        if !seen_ranks.insert(rule.priority_rank) {
            return Err(ConfigError::Validation(format!(
                "duplicate priority rank {} (industry '{}')",
                rule.priority_rank, rule.label
            )));
        }
    }

    Ok(())
}
