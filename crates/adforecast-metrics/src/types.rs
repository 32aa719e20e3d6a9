//! Ads API request and response types.
//!
//! The API is JSON over HTTPS with snake_case field names. Most summary
//! fields are optional in practice; absent values deserialize to `None`
//! rather than failing the whole response.

use adforecast_core::CampaignType;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// get-historical-metrics
// ---------------------------------------------------------------------------

/// Body for `POST /api/ai-campaign/get-historical-metrics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalMetricsRequest {
    pub keywords: Vec<String>,
    pub website_url: String,
    /// ISO 3166-1 alpha-2 codes.
    pub target_locations: Vec<String>,
    pub language_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalMetricsResponse {
    pub success: bool,
    #[serde(default)]
    pub summary: Option<MetricsSummary>,
    /// Currency of the `*_local` values.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Aggregated keyword metrics. CPC values are USD unless suffixed `_local`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsSummary {
    #[serde(default)]
    pub avg_cpc: Option<f64>,
    #[serde(default)]
    pub avg_cpc_local: Option<f64>,
    #[serde(default)]
    pub low_cpc: Option<f64>,
    #[serde(default)]
    pub high_cpc: Option<f64>,
    #[serde(default)]
    pub avg_monthly_searches: Option<f64>,
    /// `"LOW"`, `"MEDIUM"` or `"HIGH"`.
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub competition_distribution: Option<CompetitionDistribution>,
}

/// Keyword counts per competition level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionDistribution {
    #[serde(default)]
    pub low: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub high: u32,
}

// ---------------------------------------------------------------------------
// get-keyword-cpc-data
// ---------------------------------------------------------------------------

/// Body for `POST /api/ai-campaign/get-keyword-cpc-data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCpcRequest {
    pub website_url: String,
    pub campaign_type: CampaignType,
    pub daily_budget: f64,
    pub target_locations: Vec<String>,
    pub language_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordCpcResponse {
    #[serde(default)]
    pub keywords: Vec<KeywordCpc>,
}

/// Keyword suggestion with its observed CPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCpc {
    pub keyword: String,
    #[serde(default)]
    pub average_cpc: Option<f64>,
    #[serde(default)]
    pub search_volume: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_response_tolerates_sparse_summary() {
        let json = r#"{"success": true, "summary": {"avg_cpc": 1.2}}"#;
        let resp: HistoricalMetricsResponse = serde_json::from_str(json).unwrap();
        let summary = resp.summary.unwrap();
        assert_eq!(summary.avg_cpc, Some(1.2));
        assert!(summary.competition.is_none());
        assert!(summary.competition_distribution.is_none());
        assert!(resp.currency.is_none());
    }

    #[test]
    fn keyword_cpc_request_serializes_uppercase_campaign_type() {
        let req = KeywordCpcRequest {
            website_url: "example.com".to_owned(),
            campaign_type: CampaignType::Display,
            daily_budget: 20.0,
            target_locations: vec!["SA".to_owned()],
            language_id: 1000,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["campaign_type"], "DISPLAY");
        assert_eq!(value["target_locations"][0], "SA");
    }

    #[test]
    fn keyword_entry_without_metrics_parses() {
        let json = r#"{"keywords": [{"keyword": "dentist riyadh"}]}"#;
        let resp: KeywordCpcResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.keywords.len(), 1);
        assert!(resp.keywords[0].average_cpc.is_none());
    }
}
