//! Heuristic performance estimation.
//!
//! [`estimate`] derives a CPC from location, industry and campaign type;
//! [`project_from_cpc`] turns any CPC (heuristic or observed) into a 30-day
//! projection and is shared by every resolution tier.

use adforecast_core::{CampaignType, CpcEstimate, CpcEstimateRequest, SelectedLocation, SourceTier};

use crate::rates::base_cpc_for;

pub const DAYS_PER_MONTH: f64 = 30.0;

/// CPC substituted when the computed CPC is zero or not finite.
pub const DEFAULT_CPC: f64 = 0.5;

/// Estimate 30-day performance from heuristics alone.
#[must_use]
pub fn estimate(req: &CpcEstimateRequest) -> CpcEstimate {
    let base = base_cpc(&req.selected_locations);
    let cpc = base * req.industry_multiplier * req.campaign_type.cpc_multiplier();
    tracing::debug!(
        base,
        industry_multiplier = req.industry_multiplier,
        campaign_type = req.campaign_type.as_str(),
        cpc,
        "heuristic CPC computed"
    );
    project_from_cpc(cpc, req.daily_budget_usd, req.campaign_type, SourceTier::Heuristic)
}

/// Mean base rate over the distinct country codes of `locations`.
///
/// Returns `0.0` for an empty list; [`project_from_cpc`] substitutes
/// [`DEFAULT_CPC`] for it.
#[must_use]
pub fn base_cpc(locations: &[SelectedLocation]) -> f64 {
    let mut codes: Vec<String> = Vec::with_capacity(locations.len());
    for loc in locations {
        let code = loc.country_code.to_ascii_uppercase();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        return 0.0;
    }

    let total: f64 = codes.iter().map(|c| base_cpc_for(c)).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = codes.len() as f64;
    total / count
}

/// Project monthly clicks, impressions and conversions for a CPC.
///
/// A non-positive or non-finite budget yields an all-zero projection. A
/// non-positive or non-finite CPC is replaced by [`DEFAULT_CPC`].
#[must_use]
pub fn project_from_cpc(
    avg_cpc: f64,
    daily_budget_usd: f64,
    campaign_type: CampaignType,
    source_tier: SourceTier,
) -> CpcEstimate {
    let cpc = if avg_cpc.is_finite() && avg_cpc > 0.0 {
        avg_cpc
    } else {
        DEFAULT_CPC
    };

    if !daily_budget_usd.is_finite() || daily_budget_usd <= 0.0 {
        return CpcEstimate::zero(cpc, source_tier);
    }

    let monthly_budget = daily_budget_usd * DAYS_PER_MONTH;
    let monthly_clicks = round_count(monthly_budget / cpc);
    #[allow(clippy::cast_precision_loss)]
    let clicks_f = monthly_clicks as f64;
    let monthly_impressions = round_count(clicks_f / campaign_type.ctr());
    let monthly_conversions = if monthly_clicks > 0 {
        round_count(clicks_f * campaign_type.conversion_rate()).max(1)
    } else {
        0
    };

    CpcEstimate {
        monthly_impressions,
        monthly_clicks,
        monthly_conversions,
        avg_cpc: cpc,
        source_tier,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
