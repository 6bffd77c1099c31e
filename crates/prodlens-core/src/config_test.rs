use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("OPENAI_API_KEY", "sk-test");
    m.insert("BRIGHTDATA_API_KEY", "bd-test");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_openai_key() {
    let mut map = full_env();
    map.remove("OPENAI_API_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OPENAI_API_KEY"),
        "expected MissingEnvVar(OPENAI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_key_as_missing() {
    let mut map = full_env();
    map.insert("BRIGHTDATA_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BRIGHTDATA_API_KEY"),
        "expected MissingEnvVar(BRIGHTDATA_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.server_base_url, "http://localhost:3000");
    assert_eq!(cfg.openai_model, "gpt-4o");
    assert_eq!(cfg.openai_base_url, "https://api.openai.com/v1");
    assert_eq!(cfg.brightdata_base_url, "https://api.brightdata.com");
    assert_eq!(cfg.brightdata_dataset_id, "gd_l7q7dkf244hwjntr0");
    assert_eq!(cfg.max_steps, 12);
    assert_eq!(cfg.upstream_timeout_secs, 120);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("MCP_URL", "https://host.example.com/");
    map.insert("PRODLENS_MAX_STEPS", "4");
    map.insert("PRODLENS_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).expect("config");
    assert_eq!(cfg.server_base_url, "https://host.example.com/");
    assert_eq!(cfg.max_steps, 4);
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("PRODLENS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRODLENS_BIND_ADDR"),
        "expected InvalidEnvVar(PRODLENS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_steps() {
    let mut map = full_env();
    map.insert("PRODLENS_MAX_STEPS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRODLENS_MAX_STEPS"),
        "expected InvalidEnvVar(PRODLENS_MAX_STEPS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_relative_server_url() {
    let mut map = full_env();
    map.insert("MCP_URL", "localhost");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MCP_URL"),
        "expected InvalidEnvVar(MCP_URL), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config");
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-test"));
    assert!(!rendered.contains("bd-test"));
    assert!(rendered.contains("[redacted]"));
}
