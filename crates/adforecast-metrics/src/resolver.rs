//! Tiered historical-metrics resolution.
//!
//! Tries each tier in order and returns the first usable CPC:
//! session memory, the persisted cache, the remote metrics endpoint, and
//! finally the heuristic estimator. Resolution never fails; every error is
//! logged and falls through to the next tier.

use std::sync::Arc;

use adforecast_core::{AppConfig, CpcEstimateRequest, SourceTier};
use adforecast_estimate::{build_corpus, estimate, project_from_cpc, IndustryClassifier};
use chrono::Utc;

use crate::client::AdsApiClient;
use crate::error::MetricsError;
use crate::forecast::{CompetitionInsight, ForecastOutcome, ForecastRequest};
use crate::session::ForecastSession;
use crate::store::{
    get_json, metrics_cache_key, set_json, HistoricalMetricsCacheEntry, KeyValueStore,
};
use crate::types::HistoricalMetricsRequest;

pub const DEFAULT_LANGUAGE_ID: u32 = 1000;
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

struct RemoteMetrics {
    avg_cpc: f64,
    competition: Option<CompetitionInsight>,
}

pub struct HistoricalMetricsResolver {
    client: AdsApiClient,
    store: Arc<dyn KeyValueStore>,
    classifier: IndustryClassifier,
    language_id: u32,
    max_keywords: usize,
}

impl HistoricalMetricsResolver {
    #[must_use]
    pub fn new(
        client: AdsApiClient,
        store: Arc<dyn KeyValueStore>,
        classifier: IndustryClassifier,
    ) -> Self {
        Self {
            client,
            store,
            classifier,
            language_id: DEFAULT_LANGUAGE_ID,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    /// Builds the client from `config` and applies its language and keyword
    /// limits.
    ///
    /// # Errors
    ///
    /// Returns any [`MetricsError`] from client construction.
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        classifier: IndustryClassifier,
    ) -> Result<Self, MetricsError> {
        let client = AdsApiClient::from_config(config)?;
        Ok(Self::new(client, store, classifier)
            .with_language_id(config.language_id)
            .with_max_keywords(config.max_keywords))
    }

    #[must_use]
    pub fn with_language_id(mut self, language_id: u32) -> Self {
        self.language_id = language_id;
        self
    }

    #[must_use]
    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    #[must_use]
    pub fn client(&self) -> &AdsApiClient {
        &self.client
    }

    /// Resolve a forecast for `request`.
    pub async fn resolve(
        &self,
        session: &ForecastSession,
        request: &ForecastRequest,
    ) -> ForecastOutcome {
        let key = metrics_cache_key(request.site_url.as_deref());

        // Tier 1: session memory
        if let Some(avg_cpc) = session.memory_cpc(&key) {
            tracing::debug!(key, avg_cpc, "forecast resolved from session memory");
            return project(request, avg_cpc, SourceTier::Memory, None);
        }

        // Tier 2: persisted cache
        if let Some(avg_cpc) = self.cached_cpc(&key) {
            tracing::debug!(key, avg_cpc, "forecast resolved from cache");
            session.remember_cpc(&key, avg_cpc);
            return project(request, avg_cpc, SourceTier::Cache, None);
        }

        // Tier 3: remote metrics
        match self.fetch_remote(request).await {
            Ok(Some(remote)) => {
                tracing::info!(
                    key,
                    avg_cpc = remote.avg_cpc,
                    "forecast resolved from remote metrics"
                );
                session.remember_cpc(&key, remote.avg_cpc);
                self.write_cache(&key, remote.avg_cpc);
                return project(
                    request,
                    remote.avg_cpc,
                    SourceTier::Remote,
                    remote.competition,
                );
            }
            Ok(None) => {
                tracing::debug!(key, "remote metrics skipped: no keywords or target countries");
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "remote metrics failed; using heuristic estimate");
            }
        }

        // Tier 4: heuristic
        self.heuristic(request)
    }

    fn heuristic(&self, request: &ForecastRequest) -> ForecastOutcome {
        let corpus = build_corpus(&request.keywords, request.site_url.as_deref());
        let industry = self.classifier.classify(&corpus);
        tracing::debug!(
            industry = industry.label.as_str(),
            multiplier = industry.multiplier,
            "heuristic forecast"
        );
        let heuristic = estimate(&CpcEstimateRequest {
            daily_budget_usd: request.daily_budget_usd,
            selected_locations: request.locations.clone(),
            campaign_type: request.campaign_type,
            industry_multiplier: industry.multiplier,
        });
        ForecastOutcome {
            estimate: heuristic,
            competition: None,
        }
    }

    /// A usable CPC from the persisted cache, or `None` on miss. Malformed
    /// entries and store failures are logged and treated as a miss.
    fn cached_cpc(&self, key: &str) -> Option<f64> {
        match get_json::<HistoricalMetricsCacheEntry>(self.store.as_ref(), key) {
            Ok(Some(entry)) if entry.avg_cpc.is_finite() && entry.avg_cpc > 0.0 => {
                Some(entry.avg_cpc)
            }
            Ok(Some(entry)) => {
                tracing::warn!(
                    key,
                    avg_cpc = entry.avg_cpc,
                    "ignoring cache entry with unusable CPC"
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed; treating as miss");
                None
            }
        }
    }

    fn write_cache(&self, key: &str, avg_cpc: f64) {
        let entry = HistoricalMetricsCacheEntry {
            avg_cpc,
            fetched_at: Some(Utc::now()),
        };
        if let Err(e) = set_json(self.store.as_ref(), key, &entry) {
            tracing::warn!(key, error = %e, "failed to persist historical metrics");
        }
    }

    /// `Ok(None)` when the request lacks keywords or target countries.
    async fn fetch_remote(
        &self,
        request: &ForecastRequest,
    ) -> Result<Option<RemoteMetrics>, MetricsError> {
        let keywords = request.request_keywords(self.max_keywords);
        let target_locations = request.target_country_codes();
        if keywords.is_empty() || target_locations.is_empty() {
            return Ok(None);
        }

        let body = HistoricalMetricsRequest {
            keywords,
            website_url: request.site_url.clone().unwrap_or_default(),
            target_locations,
            language_id: self.language_id,
        };
        let response = self.client.historical_metrics(&body).await?;

        let avg_cpc = response
            .summary
            .as_ref()
            .and_then(|s| s.avg_cpc)
            .filter(|c| c.is_finite() && *c > 0.0)
            .ok_or(MetricsError::MissingCpc)?;

        Ok(Some(RemoteMetrics {
            avg_cpc,
            competition: CompetitionInsight::from_response(&response),
        }))
    }
}

fn project(
    request: &ForecastRequest,
    avg_cpc: f64,
    tier: SourceTier,
    competition: Option<CompetitionInsight>,
) -> ForecastOutcome {
    ForecastOutcome {
        estimate: project_from_cpc(
            avg_cpc,
            request.daily_budget_usd,
            request.campaign_type,
            tier,
        ),
        competition,
    }
}
