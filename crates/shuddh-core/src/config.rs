use crate::app_config::{AppConfig, Environment, ProviderKeys, RedditCredentials};
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
/// Decoupled from the process environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let secret = |var: &str| -> Option<String> { lookup(var).ok().and_then(non_placeholder) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHUDDH_ENV", "development"))?;
    let bind_addr = parse_addr("SHUDDH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHUDDH_LOG_LEVEL", "info");
    let demo_mode = parse_bool("SHUDDH_DEMO_MODE", &or_default("SHUDDH_DEMO_MODE", "false"))?;

    let rng_seed = match lookup("SHUDDH_RNG_SEED") {
        Ok(raw) if !raw.trim().is_empty() => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|e| invalid("SHUDDH_RNG_SEED", e.to_string()))?,
        ),
        _ => None,
    };

    let http_timeout_secs = parse_u64("SHUDDH_HTTP_TIMEOUT_SECS", "30")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "SHUDDH_HTTP_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let rate_limit_per_minute = parse_usize("SHUDDH_RATE_LIMIT_PER_MINUTE", "120")?;
    let llm_model = or_default("SHUDDH_LLM_MODEL", "gemini-2.0-flash");

    let keys = ProviderKeys {
        aqicn: secret("AQICN_API_KEY"),
        openweathermap: secret("OPENWEATHERMAP_API_KEY"),
        youtube: secret("YOUTUBE_API_KEY"),
        gemini: secret("GEMINI_API_KEY"),
        reddit: RedditCredentials {
            client_id: secret("REDDIT_CLIENT_ID"),
            client_secret: secret("REDDIT_CLIENT_SECRET"),
            username: secret("REDDIT_USERNAME"),
            password: secret("REDDIT_PASSWORD"),
            user_agent: or_default("REDDIT_USER_AGENT", "ShuddhAI/1.0"),
        },
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        demo_mode,
        rng_seed,
        http_timeout_secs,
        rate_limit_per_minute,
        llm_model,
        keys,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHUDDH_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Blank values and `.env.example` placeholders such as `YOUR_AQICN_API_KEY` count as unset.
fn non_placeholder(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("YOUR_") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
