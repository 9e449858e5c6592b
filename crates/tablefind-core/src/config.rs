use crate::app_config::{AppConfig, Environment, ProviderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("TABLEFIND_ENV", "development"))?;
    let log_level = or_default("TABLEFIND_LOG_LEVEL", "info");
    let provider = parse_provider(&or_default("TABLEFIND_PROVIDER", "places"))?;

    // `TABLEFIND_API_KEY=` with no value counts as unset.
    let api_key = lookup("TABLEFIND_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let api_host = or_default("TABLEFIND_API_HOST", provider.default_host());
    let base_url = or_default("TABLEFIND_BASE_URL", &format!("https://{api_host}"));

    let request_timeout_secs = parse_u64("TABLEFIND_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TABLEFIND_USER_AGENT", "tablefind/0.1 (restaurant-search)");
    let max_retries = parse_u32("TABLEFIND_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TABLEFIND_RETRY_BACKOFF_BASE_MS", "500")?;
    let data_dir = PathBuf::from(or_default("TABLEFIND_DATA_DIR", "./.tablefind"));
    let remember_search = parse_bool("TABLEFIND_REMEMBER_SEARCH", "true")?;

    Ok(AppConfig {
        env,
        log_level,
        provider,
        api_key,
        api_host,
        base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        data_dir,
        remember_search,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TABLEFIND_ENV".to_string(),
            reason: format!(
                "unknown environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

fn parse_provider(s: &str) -> Result<ProviderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "places" => Ok(ProviderKind::Places),
        "restaurants" => Ok(ProviderKind::Restaurants),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TABLEFIND_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}'; expected places or restaurants"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
