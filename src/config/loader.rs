//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{Result, ScoutError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add default config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with APP_ prefix
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ScoutError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ScoutError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::default();

    if let Ok(base_url) = std::env::var("UMA_SCOUT_GAMMA_URL") {
        config.gamma.base_url = base_url;
    }
    if let Ok(chain) = std::env::var("UMA_SCOUT_DEFAULT_CHAIN") {
        config.oracle.default_chain = chain;
    }
    if let Ok(batch) = std::env::var("UMA_SCOUT_BATCH_SIZE") {
        config.oracle.batch_size = batch
            .parse()
            .map_err(|_| ScoutError::Configuration(format!("invalid batch size: {batch}")))?;
    }
    if let Ok(proxies) = std::env::var("UMA_SCOUT_FALLBACK_PROXIES") {
        config.transport.fallback_proxies = proxies
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Some("does-not-exist.toml")).unwrap();
        assert_eq!(config.oracle.batch_size, 8);
        assert_eq!(config.gamma.base_url, "https://gamma-api.polymarket.com");
        assert!(config.transport.fallback_proxies.is_empty());
    }
}
