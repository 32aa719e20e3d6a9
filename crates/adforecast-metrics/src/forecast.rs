use adforecast_core::{CampaignType, CpcEstimate, SelectedLocation};
use serde::{Deserialize, Serialize};

use crate::types::{CompetitionDistribution, HistoricalMetricsResponse};

/// Everything one forecast resolution needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub site_url: Option<String>,
    pub keywords: Vec<String>,
    pub locations: Vec<SelectedLocation>,
    pub daily_budget_usd: f64,
    pub campaign_type: CampaignType,
}

impl ForecastRequest {
    /// Distinct known country codes in selection order. `"XX"` is omitted.
    #[must_use]
    pub fn target_country_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for loc in self.locations.iter().filter(|l| l.has_known_country()) {
            let code = loc.country_code.to_ascii_uppercase();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// Trimmed, non-empty keywords, at most `max`.
    #[must_use]
    pub fn request_keywords(&self, max: usize) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .take(max)
            .map(str::to_owned)
            .collect()
    }

    /// Identity of this request for single-flight purposes.
    #[must_use]
    pub fn recompute_key(&self) -> RecomputeKey {
        let mut country_codes: Vec<String> = self
            .locations
            .iter()
            .map(|l| l.country_code.to_ascii_uppercase())
            .collect();
        country_codes.sort_unstable();
        country_codes.dedup();

        RecomputeKey {
            site_url: self.site_url.clone().unwrap_or_default(),
            budget_bits: self.daily_budget_usd.to_bits(),
            campaign_type: self.campaign_type,
            country_codes,
            keywords: self.keywords.clone(),
        }
    }
}

/// Logical request identity: site, budget, campaign type, sorted country
/// codes and keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecomputeKey {
    site_url: String,
    budget_bits: u64,
    campaign_type: CampaignType,
    country_codes: Vec<String>,
    keywords: Vec<String>,
}

/// Competition summary shown next to a remote-tier estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionInsight {
    /// `"LOW"`, `"MEDIUM"`, `"HIGH"` or `"UNKNOWN"`.
    pub level: String,
    pub distribution: CompetitionDistribution,
    pub avg_monthly_searches: Option<f64>,
    pub low_cpc: Option<f64>,
    pub high_cpc: Option<f64>,
    pub avg_cpc_local: Option<f64>,
    pub currency: Option<String>,
}

impl CompetitionInsight {
    pub(crate) fn from_response(response: &HistoricalMetricsResponse) -> Option<Self> {
        let summary = response.summary.as_ref()?;
        Some(Self {
            level: summary
                .competition
                .as_deref()
                .map_or_else(|| "UNKNOWN".to_owned(), str::to_ascii_uppercase),
            distribution: summary.competition_distribution.unwrap_or_default(),
            avg_monthly_searches: summary.avg_monthly_searches,
            low_cpc: summary.low_cpc,
            high_cpc: summary.high_cpc,
            avg_cpc_local: summary.avg_cpc_local,
            currency: response.currency.clone(),
        })
    }
}

/// Result of one resolution. `competition` is only present for the remote tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub estimate: CpcEstimate,
    pub competition: Option<CompetitionInsight>,
}
