//! `forecast` and `watch`: tiered resolution against the persisted cache and
//! the campaign backend.

use std::sync::Arc;
use std::time::Duration;

use adforecast_core::{
    AppConfig, CampaignType, CpcEstimate, LocationSelection, LocationType, SelectedLocation,
    SourceTier,
};
use adforecast_geo::{CountryResolver, LocationQuery};
use adforecast_metrics::{
    set_json, CompetitionInsight, ForecastOutcome, ForecastRequest, ForecastSession,
    HistoricalMetricsResolver, JsonFileStore, KeyValueStore, KeywordCpcRequest,
    RecomputeController, REAL_CPC_KEY, SELECTED_LOCATIONS_KEY,
};
use tokio::io::AsyncBufReadExt as _;

use crate::lookup::load_classifier;
use crate::TargetArgs;

/// Split `"Riyadh, Saudi Arabia"` into main and secondary text at the first
/// Latin or Arabic comma.
pub(crate) fn parse_location(text: &str) -> LocationQuery {
    match text.split_once([',', '\u{060C}']) {
        Some((main, rest)) if !rest.trim().is_empty() => {
            LocationQuery::new(main.trim(), Some(rest.trim()))
        }
        _ => LocationQuery::new(text.trim().trim_end_matches([',', '\u{060C}']), None),
    }
}

/// Resolve each location argument. Bare names are treated as countries,
/// "Place, Country" as cities.
pub(crate) fn select_locations(
    resolver: &CountryResolver,
    texts: &[String],
) -> LocationSelection {
    let mut selection = LocationSelection::new();
    for text in texts {
        let query = parse_location(text);
        let resolved = resolver.resolve_query(&query);
        if resolved.is_unknown() {
            tracing::warn!(location = text.as_str(), "no confident country match; using XX");
        }
        let location_type = if query.secondary_text.is_some() {
            LocationType::City
        } else {
            LocationType::Country
        };
        let added = selection.add(SelectedLocation {
            id: text.trim().to_lowercase(),
            name: query.main_text.clone(),
            secondary_text: query.secondary_text.clone(),
            country_code: resolved.country_code,
            radius_km: None,
            location_type,
            coordinates: None,
        });
        if !added {
            tracing::debug!(location = text.as_str(), "duplicate location ignored");
        }
    }
    selection
}

fn build_request(
    target: &TargetArgs,
    selection: &LocationSelection,
    budget: f64,
) -> ForecastRequest {
    ForecastRequest {
        site_url: target.site.clone(),
        keywords: target.keywords.clone(),
        locations: selection.as_slice().to_vec(),
        daily_budget_usd: budget,
        campaign_type: CampaignType::from_label(&target.campaign_type),
    }
}

pub(crate) fn open_store(config: &AppConfig) -> anyhow::Result<Arc<JsonFileStore>> {
    let store = JsonFileStore::open(&config.cache_path)?;
    tracing::debug!(path = %config.cache_path.display(), "opened store");
    Ok(Arc::new(store))
}

fn build_resolver(
    config: &AppConfig,
    store: Arc<JsonFileStore>,
) -> anyhow::Result<HistoricalMetricsResolver> {
    let classifier = load_classifier(config)?;
    let resolver = HistoricalMetricsResolver::from_config(config, store, classifier)?;
    Ok(resolver)
}

/// Keyword suggestions from the backend. Failures are logged and yield none.
async fn suggest_keywords(
    config: &AppConfig,
    resolver: &HistoricalMetricsResolver,
    request: &ForecastRequest,
) -> Vec<String> {
    let body = KeywordCpcRequest {
        website_url: request.site_url.clone().unwrap_or_default(),
        campaign_type: request.campaign_type,
        daily_budget: request.daily_budget_usd,
        target_locations: request.target_country_codes(),
        language_id: config.language_id,
    };
    match resolver.client().keyword_cpc_data(&body).await {
        Ok(keywords) => keywords
            .into_iter()
            .map(|k| k.keyword)
            .take(config.max_keywords)
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "keyword suggestion failed");
            Vec::new()
        }
    }
}

pub(crate) async fn run_forecast(
    config: &AppConfig,
    target: &TargetArgs,
    budget: f64,
    suggest: bool,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let resolver = build_resolver(config, Arc::clone(&store))?;
    let selection = select_locations(&CountryResolver::new(), &target.locations);
    let mut request = build_request(target, &selection, budget);

    if request.keywords.is_empty() && suggest {
        request.keywords = suggest_keywords(config, &resolver, &request).await;
        tracing::info!(count = request.keywords.len(), "using suggested keywords");
    }

    let session = ForecastSession::new();
    tracing::debug!(session = %session.id(), "forecast session started");
    let outcome = resolver.resolve(&session, &request).await;

    persist_wizard_state(store.as_ref(), &selection, &outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for loc in selection.as_slice() {
            println!("location:     {} -> {}", loc.name, loc.country_code);
        }
        print_outcome(&outcome);
    }
    Ok(())
}

/// Store the selected locations and, for non-heuristic results, the real CPC.
fn persist_wizard_state(
    store: &dyn KeyValueStore,
    selection: &LocationSelection,
    outcome: &ForecastOutcome,
) {
    if let Err(e) = set_json(store, SELECTED_LOCATIONS_KEY, selection) {
        tracing::warn!(error = %e, "failed to store selected locations");
    }
    if outcome.estimate.source_tier != SourceTier::Heuristic {
        if let Err(e) = set_json(store, REAL_CPC_KEY, &outcome.estimate.avg_cpc) {
            tracing::warn!(error = %e, "failed to store real CPC");
        }
    }
}

pub(crate) async fn run_watch(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let resolver = Arc::new(build_resolver(config, Arc::clone(&store))?);
    let selection = select_locations(&CountryResolver::new(), &target.locations);
    let delay = Duration::from_millis(config.debounce_ms);
    let controller =
        RecomputeController::for_resolver(resolver, Arc::new(ForecastSession::new()), delay);

    let mut rx = controller.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let latest = rx.borrow_and_update().clone();
            if let Some(outcome) = latest {
                print_outcome(&outcome);
            }
        }
    });

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<f64>() {
            Ok(budget) => controller.schedule(build_request(target, &selection, budget)),
            Err(e) => tracing::warn!(input = line, error = %e, "not a budget; ignored"),
        }
    }

    // Let the last pending timer fire, then wait out in-flight resolutions.
    tokio::time::sleep(delay + Duration::from_millis(50)).await;
    let grace = Duration::from_secs(config.request_timeout_secs + 5);
    let deadline = tokio::time::Instant::now() + grace;
    while controller.in_flight_count() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    // Dropping the controller closes the display channel once no resolution
    // holds it; the printer drains the last value and exits.
    drop(controller);
    printer.await?;
    Ok(())
}

pub(crate) fn print_estimate(estimate: &CpcEstimate) {
    println!("source:       {}", estimate.source_tier);
    println!("avg CPC:      ${:.2}", estimate.avg_cpc);
    println!("impressions:  {}", estimate.monthly_impressions);
    println!("clicks:       {}", estimate.monthly_clicks);
    println!("conversions:  {}", estimate.monthly_conversions);
}

fn print_competition(competition: &CompetitionInsight) {
    let d = competition.distribution;
    println!(
        "competition:  {} (low {}, medium {}, high {})",
        competition.level, d.low, d.medium, d.high
    );
    if let (Some(low), Some(high)) = (competition.low_cpc, competition.high_cpc) {
        println!("CPC range:    ${low:.2} - ${high:.2}");
    }
    if let Some(searches) = competition.avg_monthly_searches {
        println!("searches/mo:  {searches:.0}");
    }
}

fn print_outcome(outcome: &ForecastOutcome) {
    print_estimate(&outcome.estimate);
    if let Some(competition) = &outcome.competition {
        print_competition(competition);
    }
}
