//! Fallback-aware HTTP transport
//!
//! Executes one logical request against a primary URL, retrying through an
//! ordered list of proxy rewrites when the direct attempt fails. There is no
//! backoff and no second pass: each configured route is tried exactly once.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::common::errors::{Result, ScoutError};
use crate::config::types::TransportConfig;

/// Outcome of one logical request: the HTTP status of the winning attempt and
/// its decoded JSON body. Callers inspect the status for 404 classification.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    /// Status of the successful attempt
    pub status: StatusCode,
    /// Decoded response body
    pub body: serde_json::Value,
}

/// HTTP transport with an ordered fallback-proxy list
#[derive(Debug, Clone)]
pub struct Transport {
    /// HTTP client
    client: Client,
    /// Proxy URL prefixes, tried in order after the direct attempt
    fallback_proxies: Vec<String>,
}

impl Transport {
    /// Create a transport from configuration
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Self::with_timeout(
            config.fallback_proxies.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Create a transport with an explicit timeout
    pub fn with_timeout(fallback_proxies: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScoutError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            fallback_proxies,
        })
    }

    /// Rewrite a URL to route through a proxy prefix. The target URL is
    /// percent-encoded and appended to the prefix.
    fn rewrite_through(proxy: &str, url: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        format!("{proxy}{encoded}")
    }

    /// All routes for a URL: the direct URL first, then each proxy rewrite.
    fn routes(&self, url: &str) -> Vec<String> {
        let mut routes = Vec::with_capacity(1 + self.fallback_proxies.len());
        routes.push(url.to_string());
        for proxy in &self.fallback_proxies {
            routes.push(Self::rewrite_through(proxy, url));
        }
        routes
    }

    /// Execute a GET request, returning the first successful attempt's JSON.
    pub async fn get_json(&self, url: &str) -> Result<JsonResponse> {
        self.execute(url, None, false).await
    }

    /// Execute a GET request where a 404 is a delivered answer rather than
    /// an attempt failure. For lookups whose not-found classification belongs
    /// to the caller; proxying a 404 would only replay the same answer.
    pub async fn get_json_allowing_not_found(&self, url: &str) -> Result<JsonResponse> {
        self.execute(url, None, true).await
    }

    /// Execute a POST request with a JSON body, returning the first
    /// successful attempt's JSON.
    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<JsonResponse> {
        let payload = serde_json::to_value(body)?;
        self.execute(url, Some(payload), false).await
    }

    async fn execute(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        allow_not_found: bool,
    ) -> Result<JsonResponse> {
        let mut last_failure = String::new();

        for (attempt, route) in self.routes(url).iter().enumerate() {
            debug!("Transport attempt {} -> {}", attempt, route);

            let request = match &body {
                Some(json) => self.client.post(route).json(json),
                None => self.client.get(route),
            };

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Transport attempt {} failed: {}", attempt, e);
                    last_failure = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            let delivered = status.is_success()
                || (allow_not_found && status == StatusCode::NOT_FOUND);
            if !delivered {
                // Non-2xx bodies are read fully for diagnostics but count as
                // a failed attempt for this route.
                let text = response.text().await.unwrap_or_default();
                warn!("Transport attempt {} returned status {}", attempt, status);
                last_failure = format!("request failed ({status}): {text}");
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            let body = if text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                match serde_json::from_str(&text) {
                    Ok(value) => value,
                    Err(e) => {
                        last_failure = format!("invalid JSON body: {e}");
                        continue;
                    }
                }
            };

            return Ok(JsonResponse { status, body });
        }

        Err(ScoutError::Transport(if last_failure.is_empty() {
            "no transport routes configured".to_string()
        } else {
            last_failure
        }))
    }
}
