//! Offline commands: country resolution, industry classification and the
//! heuristic estimate. None of these touch the cache or the network.

use adforecast_core::{AppConfig, CampaignType, CpcEstimateRequest, SelectedLocation};
use adforecast_estimate::{build_corpus, estimate, IndustryClassifier};
use adforecast_geo::{CountryResolver, LocationQuery};

/// Classifier from the configured rules file, or the bundled table.
pub(crate) fn load_classifier(config: &AppConfig) -> anyhow::Result<IndustryClassifier> {
    let classifier = match &config.industry_rules_path {
        Some(path) => {
            let rules = adforecast_core::load_industry_rules(path)?;
            tracing::debug!(
                path = %path.display(),
                rules = rules.rules.len(),
                "loaded industry rules"
            );
            IndustryClassifier::from_rules(&rules)?
        }
        None => IndustryClassifier::bundled()?,
    };
    Ok(classifier)
}

pub(crate) fn run_country(text: &str, secondary: Option<&str>) {
    let resolver = CountryResolver::new();
    let resolved = resolver.resolve_query(&LocationQuery::new(text, secondary));
    println!(
        "{}\t{:?}\t{}",
        resolved.country_code, resolved.matched_strategy, resolved.source_text
    );
}

pub(crate) fn run_classify(
    config: &AppConfig,
    keywords: &[String],
    site: Option<&str>,
) -> anyhow::Result<()> {
    let classifier = load_classifier(config)?;
    let corpus = build_corpus(keywords, site);
    let hit = classifier.classify(&corpus);
    println!("{}\t{:.2}", hit.label, hit.multiplier);
    Ok(())
}

pub(crate) struct EstimateInput<'a> {
    pub budget: f64,
    pub countries: &'a [String],
    pub keywords: &'a [String],
    pub site: Option<&'a str>,
    pub campaign_type: &'a str,
}

pub(crate) fn run_estimate(
    config: &AppConfig,
    input: &EstimateInput<'_>,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = load_classifier(config)?;
    let industry = classifier.classify(&build_corpus(input.keywords, input.site));

    let selected_locations = input
        .countries
        .iter()
        .map(|code| SelectedLocation::country(code, code, code))
        .collect();
    let result = estimate(&CpcEstimateRequest {
        daily_budget_usd: input.budget,
        selected_locations,
        campaign_type: CampaignType::from_label(input.campaign_type),
        industry_multiplier: industry.multiplier,
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("industry:     {} (x{:.2})", industry.label, industry.multiplier);
        crate::forecast::print_estimate(&result);
    }
    Ok(())
}
