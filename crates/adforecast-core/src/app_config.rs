use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the campaign backend serving `/api/ai-campaign/*`.
    pub api_base_url: String,
    /// Optional bearer token forwarded to the campaign backend.
    pub api_token: Option<String>,
    /// JSON file standing in for the browser key-value store.
    pub cache_path: PathBuf,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    pub user_agent: String,
    /// Google Ads language criterion id (1000 = English, 1019 = Arabic).
    pub language_id: u32,
    pub max_keywords: usize,
    /// Overrides the bundled industry rule table when set.
    pub industry_rules_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("cache_path", &self.cache_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("debounce_ms", &self.debounce_ms)
            .field("user_agent", &self.user_agent)
            .field("language_id", &self.language_id)
            .field("max_keywords", &self.max_keywords)
            .field("industry_rules_path", &self.industry_rules_path)
            .finish()
    }
}
