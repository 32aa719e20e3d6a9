use adforecast_core::{CampaignType, CpcEstimateRequest, SelectedLocation, SourceTier};

use super::*;

fn saudi() -> SelectedLocation {
    SelectedLocation::country("place-sa", "Saudi Arabia", "SA")
}

fn request(budget: f64, locations: Vec<SelectedLocation>) -> CpcEstimateRequest {
    CpcEstimateRequest {
        daily_budget_usd: budget,
        selected_locations: locations,
        campaign_type: CampaignType::Search,
        industry_multiplier: 1.0,
    }
}

#[test]
fn saudi_search_general_business_end_to_end() {
    let est = estimate(&request(15.0, vec![saudi()]));
    assert!((est.avg_cpc - 2.8).abs() < 1e-9);
    assert_eq!(est.monthly_clicks, 161);
    assert_eq!(est.monthly_impressions, 4025);
    assert_eq!(est.monthly_conversions, 5);
    assert_eq!(est.source_tier, SourceTier::Heuristic);
}

#[test]
fn clicks_are_monotonic_in_budget() {
    let low = estimate(&request(15.0, vec![saudi()]));
    let high = estimate(&request(30.0, vec![saudi()]));
    assert!(high.monthly_clicks >= low.monthly_clicks);
    assert!(high.monthly_impressions >= low.monthly_impressions);
}

#[test]
fn conversions_floor_at_one_when_clicks_exist() {
    let est = project_from_cpc(10.0, 1.0, CampaignType::Search, SourceTier::Cache);
    assert_eq!(est.monthly_clicks, 3);
    assert_eq!(est.monthly_conversions, 1);
}

#[test]
fn zero_or_negative_budget_yields_zero_estimate() {
    for budget in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let est = estimate(&request(budget, vec![saudi()]));
        assert_eq!(est.monthly_clicks, 0, "budget {budget}");
        assert_eq!(est.monthly_impressions, 0);
        assert_eq!(est.monthly_conversions, 0);
    }
}

#[test]
fn no_locations_uses_default_cpc() {
    let est = estimate(&request(15.0, Vec::new()));
    assert!((est.avg_cpc - DEFAULT_CPC).abs() < f64::EPSILON);
    assert_eq!(est.monthly_clicks, 900);
    assert_eq!(est.monthly_impressions, 22_500);
    assert_eq!(est.monthly_conversions, 27);
}

#[test]
fn unknown_country_uses_default_rate() {
    let unknown = SelectedLocation::country("place-x", "Atlantis", "XX");
    assert!((base_cpc(&[unknown]) - 1.5).abs() < f64::EPSILON);
}

#[test]
fn duplicate_country_codes_count_once() {
    let riyadh = SelectedLocation {
        id: "place-riyadh".to_owned(),
        ..SelectedLocation::country("x", "Riyadh", "SA")
    };
    let dubai = SelectedLocation::country("place-ae", "Dubai", "AE");
    // mean(SA, AE) = (2.8 + 3.2) / 2, Riyadh does not double-weight SA
    let base = base_cpc(&[saudi(), riyadh, dubai]);
    assert!((base - 3.0).abs() < 1e-9);
}

#[test]
fn multipliers_compound() {
    let req = CpcEstimateRequest {
        daily_budget_usd: 15.0,
        selected_locations: vec![saudi()],
        campaign_type: CampaignType::Shopping,
        industry_multiplier: 2.0,
    };
    let est = estimate(&req);
    assert!((est.avg_cpc - 2.8 * 2.0 * 1.25).abs() < 1e-9);
}

#[test]
fn impressions_never_below_clicks() {
    for campaign_type in [
        CampaignType::Search,
        CampaignType::Display,
        CampaignType::Video,
        CampaignType::Shopping,
    ] {
        let est = project_from_cpc(0.75, 40.0, campaign_type, SourceTier::Remote);
        assert!(est.monthly_impressions >= est.monthly_clicks, "{campaign_type}");
    }
}

#[test]
fn invalid_observed_cpc_falls_back_to_default() {
    let est = project_from_cpc(f64::NAN, 15.0, CampaignType::Search, SourceTier::Remote);
    assert!((est.avg_cpc - DEFAULT_CPC).abs() < f64::EPSILON);
    assert_eq!(est.source_tier, SourceTier::Remote);
}
