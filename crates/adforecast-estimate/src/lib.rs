//! Heuristic side of the forecast pipeline.
//!
//! Classifies the advertiser's industry from keywords and site URL, then
//! combines per-country base CPC, the industry multiplier and campaign-type
//! constants into a 30-day projection.

pub mod engine;
pub mod error;
pub mod industry;
pub mod rates;

pub use engine::{base_cpc, estimate, project_from_cpc, DAYS_PER_MONTH, DEFAULT_CPC};
pub use error::EstimateError;
pub use industry::{
    build_corpus, IndustryClassifier, IndustryMatch, IndustryRule, DEFAULT_INDUSTRY_LABEL,
    DEFAULT_INDUSTRY_MULTIPLIER,
};
pub use rates::{base_cpc_for, DEFAULT_BASE_CPC};
