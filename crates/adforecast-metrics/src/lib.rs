//! Historical metrics resolution for campaign forecasts.
//!
//! Resolves an average CPC through session memory, a persisted key-value
//! cache and the campaign backend's metrics endpoint, falling back to the
//! heuristic estimator. [`RecomputeController`] re-runs resolution as wizard
//! inputs change, debounced and single-flight per request key.

pub mod client;
pub mod error;
pub mod forecast;
pub mod recompute;
pub mod resolver;
pub mod session;
pub mod store;
pub mod types;

pub use client::AdsApiClient;
pub use error::{MetricsError, StoreError};
pub use forecast::{CompetitionInsight, ForecastOutcome, ForecastRequest, RecomputeKey};
pub use recompute::{RecomputeController, ResolveFn, DEFAULT_DEBOUNCE};
pub use resolver::{HistoricalMetricsResolver, DEFAULT_LANGUAGE_ID, DEFAULT_MAX_KEYWORDS};
pub use session::ForecastSession;
pub use store::{
    clear_metrics_entries, get_json, metrics_cache_key, set_json, HistoricalMetricsCacheEntry,
    JsonFileStore, KeyValueStore, MemoryStore, METRICS_KEY_PREFIX, REAL_CPC_KEY,
    SELECTED_LOCATIONS_KEY,
};
pub use types::{
    CompetitionDistribution, HistoricalMetricsRequest, HistoricalMetricsResponse, KeywordCpc,
    KeywordCpcRequest, KeywordCpcResponse, MetricsSummary,
};
