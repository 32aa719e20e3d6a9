//! HTTP client for the campaign backend's `/api/ai-campaign/*` endpoints.
//!
//! Wraps `reqwest` with endpoint-specific error handling, optional bearer
//! authentication, and typed response deserialization. Every request is
//! bounded by the client-wide timeout; there are no retries.

use std::time::Duration;

use adforecast_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MetricsError;
use crate::types::{
    HistoricalMetricsRequest, HistoricalMetricsResponse, KeywordCpc, KeywordCpcRequest,
    KeywordCpcResponse,
};

pub(crate) const HISTORICAL_METRICS_PATH: &str = "api/ai-campaign/get-historical-metrics";
pub(crate) const KEYWORD_CPC_PATH: &str = "api/ai-campaign/get-keyword-cpc-data";

/// Client for the ads metrics API.
///
/// Use [`AdsApiClient::from_config`] in the binary or
/// [`AdsApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct AdsApiClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl AdsApiClient {
    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`MetricsError::InvalidBaseUrl`] for a bad base URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, MetricsError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.api_token.as_deref(),
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`MetricsError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_token: Option<&str>,
    ) -> Result<Self, MetricsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so that `Url::join` appends endpoint
        // paths below any path prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MetricsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.map(str::to_owned),
        })
    }

    /// Fetches aggregated historical keyword metrics for a site.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::Http`] on network failure or timeout.
    /// - [`MetricsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MetricsError::Deserialize`] if the body does not match the expected shape.
    /// - [`MetricsError::ApiError`] if the API answers `"success": false`.
    pub async fn historical_metrics(
        &self,
        request: &HistoricalMetricsRequest,
    ) -> Result<HistoricalMetricsResponse, MetricsError> {
        let response: HistoricalMetricsResponse =
            self.post_json(HISTORICAL_METRICS_PATH, request).await?;
        if !response.success {
            let msg = response
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_owned());
            return Err(MetricsError::ApiError(msg));
        }
        Ok(response)
    }

    /// Fetches keyword suggestions with per-keyword CPC for a site.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::Http`] on network failure or timeout.
    /// - [`MetricsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MetricsError::Deserialize`] if the body does not match the expected shape.
    pub async fn keyword_cpc_data(
        &self,
        request: &KeywordCpcRequest,
    ) -> Result<Vec<KeywordCpc>, MetricsError> {
        let response: KeywordCpcResponse = self.post_json(KEYWORD_CPC_PATH, request).await?;
        Ok(response.keywords)
    }

    fn endpoint(&self, path: &str) -> Result<Url, MetricsError> {
        self.base_url
            .join(path)
            .map_err(|e| MetricsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// POSTs `body` as JSON, asserts a 2xx status and parses the response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, MetricsError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetricsError::UnexpectedStatus {
                endpoint: path.to_owned(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| MetricsError::Deserialize {
            context: path.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
