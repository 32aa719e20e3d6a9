use serde::{Deserialize, Serialize};

use crate::campaign::CampaignType;
use crate::locations::SelectedLocation;

/// Which resolution tier produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    Memory,
    Cache,
    Remote,
    Heuristic,
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTier::Memory => write!(f, "memory"),
            SourceTier::Cache => write!(f, "cache"),
            SourceTier::Remote => write!(f, "remote"),
            SourceTier::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Inputs to the heuristic estimator. Built fresh for every call.
#[derive(Debug, Clone)]
pub struct CpcEstimateRequest {
    pub daily_budget_usd: f64,
    pub selected_locations: Vec<SelectedLocation>,
    pub campaign_type: CampaignType,
    pub industry_multiplier: f64,
}

/// Projected 30-day performance for a daily budget.
///
/// `monthly_conversions >= 1` whenever `monthly_clicks > 0`, and
/// `monthly_impressions >= monthly_clicks`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpcEstimate {
    pub monthly_impressions: u64,
    pub monthly_clicks: u64,
    pub monthly_conversions: u64,
    pub avg_cpc: f64,
    pub source_tier: SourceTier,
}

impl CpcEstimate {
    /// An all-zero estimate, used for non-positive budgets.
    #[must_use]
    pub fn zero(avg_cpc: f64, source_tier: SourceTier) -> Self {
        Self {
            monthly_impressions: 0,
            monthly_clicks: 0,
            monthly_conversions: 0,
            avg_cpc,
            source_tier,
        }
    }
}
