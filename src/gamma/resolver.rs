//! Event resolution against the Gamma API
//!
//! Resolves a [`Target`] into its primary event, then walks the shallow
//! parent/child hierarchy so siblings of the input event are shown without
//! the user knowing the root id.

use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::events::GammaEvent;
use crate::common::errors::{Result, ScoutError};
use crate::config::types::GammaConfig;
use crate::input::Target;
use crate::transport::Transport;

/// Related events plus soft-failure diagnostics. Parent and children lookups
/// degrade gracefully: a failed lookup becomes a warning, never an error.
#[derive(Debug, Default)]
pub struct RelatedEvents {
    /// Deduplicated events in insertion order: primary, parent, children
    pub events: Vec<GammaEvent>,
    /// Human-readable warnings from failed best-effort lookups
    pub warnings: Vec<String>,
}

/// Client for the Gamma events API
#[derive(Debug, Clone)]
pub struct EventResolver {
    /// Fallback-aware transport
    transport: Transport,
    /// Base URL for the Gamma API
    base_url: String,
    /// Page size for child-event listing
    children_limit: u32,
}

impl EventResolver {
    /// Create a resolver from configuration
    pub fn new(transport: Transport, config: &GammaConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            children_limit: config.children_limit,
        }
    }

    /// Fetch the event a target points at.
    ///
    /// Tries the slug endpoint first, then the numeric id endpoint. A 404
    /// status, a payload carrying an `error` field, or a non-object payload
    /// is a not-found signal for that attempt; transport failures propagate.
    #[instrument(skip(self))]
    pub async fn fetch_primary_event(&self, target: &Target) -> Result<GammaEvent> {
        let mut attempts = Vec::new();
        if let Some(slug) = target.slug.as_deref().filter(|s| !s.is_empty()) {
            attempts.push(format!("{}/events/slug/{}", self.base_url, slug));
        }
        if let Some(id) = target.event_id.as_deref().filter(|id| !id.is_empty()) {
            attempts.push(format!("{}/events/{}", self.base_url, id));
        }
        if attempts.is_empty() {
            return Err(ScoutError::Configuration(
                "unable to determine slug or event id from input".to_string(),
            ));
        }

        for endpoint in &attempts {
            debug!("Fetching event from: {}", endpoint);
            if let Some(event) = self.attempt_event(endpoint).await? {
                return Ok(event);
            }
        }

        Err(ScoutError::EventNotFound(
            "Polymarket event not found. Double-check the slug or event id.".to_string(),
        ))
    }

    /// Gather the primary event's relatives: its parent (when it has one)
    /// and every event sharing the same root.
    ///
    /// The returned set is deduplicated by event id and ordered primary →
    /// parent → children. Lookup failures are downgraded to warnings.
    #[instrument(skip(self, primary))]
    pub async fn gather_related_events(&self, primary: GammaEvent) -> RelatedEvents {
        let mut related = RelatedEvents::default();
        let mut seen: Vec<String> = Vec::new();

        let root_id = primary
            .parent_event_id
            .clone()
            .or_else(|| primary.id.clone());
        let parent_id = primary.parent_event_id.clone();

        if let Some(id) = &primary.id {
            seen.push(id.clone());
        }
        related.events.push(primary);

        if let Some(parent_id) = parent_id {
            let endpoint = format!("{}/events/{}", self.base_url, parent_id);
            match self.attempt_event(&endpoint).await {
                Ok(Some(parent)) => Self::push_unique(&mut related.events, &mut seen, parent),
                Ok(None) => {
                    warn!("Parent event {} not found", parent_id);
                    related
                        .warnings
                        .push(format!("parent event {parent_id} not found"));
                }
                Err(e) => {
                    warn!("Parent event lookup failed: {}", e);
                    related
                        .warnings
                        .push(format!("parent event lookup failed: {e}"));
                }
            }
        }

        if let Some(root_id) = root_id {
            match self.fetch_children(&root_id).await {
                Ok(children) => {
                    for child in children {
                        Self::push_unique(&mut related.events, &mut seen, child);
                    }
                }
                Err(e) => {
                    warn!("Child event lookup failed: {}", e);
                    related
                        .warnings
                        .push(format!("child event lookup failed: {e}"));
                }
            }
        }

        related
    }

    /// One event-lookup attempt. `Ok(None)` is a not-found signal for this
    /// endpoint; only transport failures surface as errors.
    async fn attempt_event(&self, endpoint: &str) -> Result<Option<GammaEvent>> {
        let response = self.transport.get_json_allowing_not_found(endpoint).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload = match response.body {
            serde_json::Value::Object(map) => map,
            // Some endpoints return empty bodies for valid-but-empty results
            _ => return Ok(None),
        };
        if payload.contains_key("error") {
            return Ok(None);
        }

        let event: GammaEvent = serde_json::from_value(serde_json::Value::Object(payload))?;
        Ok(Some(event))
    }

    /// List all events whose parent is `root_id`, in provider order
    async fn fetch_children(&self, root_id: &str) -> Result<Vec<GammaEvent>> {
        let endpoint = format!(
            "{}/events?parent_event_id={}&limit={}",
            self.base_url, root_id, self.children_limit
        );
        debug!("Fetching child events from: {}", endpoint);

        let response = self.transport.get_json(&endpoint).await?;
        match response.body {
            serde_json::Value::Array(items) => {
                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    children.push(serde_json::from_value(item)?);
                }
                Ok(children)
            }
            serde_json::Value::Null => Ok(Vec::new()),
            other => Err(ScoutError::InvalidResponse(format!(
                "expected an event list, got: {other}"
            ))),
        }
    }

    fn push_unique(events: &mut Vec<GammaEvent>, seen: &mut Vec<String>, event: GammaEvent) {
        match &event.id {
            Some(id) if seen.contains(id) => {}
            Some(id) => {
                seen.push(id.clone());
                events.push(event);
            }
            // Events without an id cannot be deduplicated; keep them
            None => events.push(event),
        }
    }
}
