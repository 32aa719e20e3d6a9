use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("industry rules could not be loaded: {0}")]
    Rules(#[from] adforecast_core::ConfigError),

    #[error("invalid pattern for industry '{label}': {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}
