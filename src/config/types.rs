//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Gamma event API configuration
    #[serde(default)]
    pub gamma: GammaConfig,
    /// Oracle subgraph configuration
    #[serde(default)]
    pub oracle: OracleConfig,
    /// HTTP transport configuration
    #[serde(default)]
    pub transport: TransportConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Gamma event API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GammaConfig {
    /// Base URL for the Gamma events API
    #[serde(default = "default_gamma_base_url")]
    pub base_url: String,
    /// Page size when listing child events of a root
    #[serde(default = "default_children_limit")]
    pub children_limit: u32,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: default_gamma_base_url(),
            children_limit: default_children_limit(),
        }
    }
}

fn default_gamma_base_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_children_limit() -> u32 {
    50
}

/// Oracle subgraph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Subgraph endpoint per chain key
    #[serde(default = "default_chain_endpoints")]
    pub endpoints: HashMap<String, String>,
    /// Chain key used when the requested key is unknown or absent
    #[serde(default = "default_chain")]
    pub default_chain: String,
    /// Number of markets packed into one bulk query
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoints: default_chain_endpoints(),
            default_chain: default_chain(),
            batch_size: default_batch_size(),
        }
    }
}

impl OracleConfig {
    /// Resolve a chain key to its subgraph endpoint, falling back to the
    /// default chain for unknown keys.
    pub fn endpoint_for(&self, chain_key: &str) -> Option<&str> {
        self.endpoints
            .get(chain_key)
            .or_else(|| self.endpoints.get(&self.default_chain))
            .map(String::as_str)
    }
}

fn default_chain_endpoints() -> HashMap<String, String> {
    HashMap::from([
        (
            "polygon".to_string(),
            "https://api.goldsky.com/api/public/project_clus2fndawbcc01w31192938i/subgraphs/polygon-managed-optimistic-oracle-v2/1.0.4/gn".to_string(),
        ),
        (
            "amoy".to_string(),
            "https://api.goldsky.com/api/public/project_clus2fndawbcc01w31192938i/subgraphs/amoy-managed-optimistic-oracle-v2/1.1.0/gn".to_string(),
        ),
    ])
}

fn default_chain() -> String {
    "polygon".to_string()
}

fn default_batch_size() -> usize {
    8
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Proxy URL prefixes tried in order after the direct request fails.
    /// The target URL is percent-encoded and appended to the prefix.
    #[serde(default)]
    pub fallback_proxies: Vec<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            fallback_proxies: Vec::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
