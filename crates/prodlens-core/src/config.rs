use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can feed a
/// plain `HashMap` instead of mutating global state.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let openai_api_key = require("OPENAI_API_KEY")?;
    let brightdata_api_key = require("BRIGHTDATA_API_KEY")?;

    let env = parse_environment(&or_default("PRODLENS_ENV", "development"));
    let bind_addr = parse_addr("PRODLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PRODLENS_LOG_LEVEL", "info");

    let server_base_url = or_default("MCP_URL", "http://localhost:3000");
    if url::Url::parse(&server_base_url).is_err() {
        return Err(ConfigError::InvalidEnvVar {
            var: "MCP_URL".to_string(),
            reason: format!("'{server_base_url}' is not an absolute URL"),
        });
    }

    let openai_model = or_default("PRODLENS_OPENAI_MODEL", "gpt-4o");
    let openai_base_url = or_default("PRODLENS_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let brightdata_base_url =
        or_default("PRODLENS_BRIGHTDATA_BASE_URL", "https://api.brightdata.com");
    let brightdata_dataset_id =
        or_default("PRODLENS_BRIGHTDATA_DATASET_ID", "gd_l7q7dkf244hwjntr0");

    let max_steps = parse_u32("PRODLENS_MAX_STEPS", "12")?;
    if max_steps == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRODLENS_MAX_STEPS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let upstream_timeout_secs = parse_u64("PRODLENS_UPSTREAM_TIMEOUT_SECS", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        server_base_url,
        openai_api_key,
        openai_model,
        openai_base_url,
        brightdata_api_key,
        brightdata_base_url,
        brightdata_dataset_id,
        max_steps,
        upstream_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
