use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("ADFORECAST_ENV", "development"))?;
    let log_level = or_default("ADFORECAST_LOG_LEVEL", "info");

    let api_base_url = or_default("ADFORECAST_API_BASE_URL", "http://localhost:3000");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADFORECAST_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{api_base_url}'"),
        });
    }
    let api_token = lookup("ADFORECAST_API_TOKEN").ok().filter(|t| !t.is_empty());

    let cache_path = PathBuf::from(or_default(
        "ADFORECAST_CACHE_PATH",
        "./.adforecast/cache.json",
    ));
    let request_timeout_secs = parse_u64("ADFORECAST_REQUEST_TIMEOUT_SECS", "30")?;
    let debounce_ms = parse_u64("ADFORECAST_DEBOUNCE_MS", "500")?;
    let user_agent = or_default(
        "ADFORECAST_USER_AGENT",
        "adforecast/0.1 (campaign-forecast)",
    );
    let language_id = parse_u32("ADFORECAST_LANGUAGE_ID", "1000")?;

    let max_keywords = parse_usize("ADFORECAST_MAX_KEYWORDS", "10")?;
    if max_keywords == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADFORECAST_MAX_KEYWORDS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let industry_rules_path = lookup("ADFORECAST_INDUSTRY_RULES_PATH")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        api_token,
        cache_path,
        request_timeout_secs,
        debounce_ms,
        user_agent,
        language_id,
        max_keywords,
        industry_rules_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADFORECAST_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
