use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_LLM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.0-flash-lite-001";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
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
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("RADAR_ENV", "development"))?;
    let log_level = or_default("RADAR_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default("RADAR_BRANDS_PATH", "./config/brands.yaml"));

    // An empty key is treated the same as an absent one.
    let openrouter_api_key = lookup("OPENROUTER_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    let llm_url = or_default("RADAR_LLM_URL", DEFAULT_LLM_URL);
    let llm_model = or_default("RADAR_LLM_MODEL", DEFAULT_LLM_MODEL);
    let llm_request_timeout_secs = parse_u64("RADAR_LLM_TIMEOUT_SECS", "30")?;
    let llm_inter_request_delay_ms = parse_u64("RADAR_LLM_DELAY_MS", "100")?;

    if llm_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RADAR_LLM_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        brands_path,
        openrouter_api_key,
        llm_url,
        llm_model,
        llm_request_timeout_secs,
        llm_inter_request_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RADAR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
