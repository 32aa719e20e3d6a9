//! Shared domain types and configuration for the campaign forecast pipeline.

pub mod app_config;
pub mod campaign;
pub mod config;
pub mod estimate;
pub mod industry_rules;
pub mod locations;

pub use app_config::{AppConfig, Environment};
pub use campaign::CampaignType;
pub use config::{load_app_config, load_app_config_from_env};
pub use estimate::{CpcEstimate, CpcEstimateRequest, SourceTier};
pub use industry_rules::{
    bundled_industry_rules, load_industry_rules, parse_industry_rules, IndustryRuleConfig,
    IndustryRulesFile,
};
pub use locations::{
    Coordinates, LocationSelection, LocationType, SelectedLocation, UNKNOWN_COUNTRY,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read industry rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse industry rules: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("industry rules validation failed: {0}")]
    Validation(String),
}
