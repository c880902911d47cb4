//! Gamma event API payload types
//!
//! The Gamma API is loose about field shapes (ids arrive as strings or
//! numbers, most fields are optional), so decoding is tolerant: unknown
//! fields are ignored and identifiers are normalized to strings.

use serde::{Deserialize, Deserializer};

/// A Polymarket event, possibly part of a shallow parent/child hierarchy
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEvent {
    /// Event id, normalized to its string form
    #[serde(default, deserialize_with = "de_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Parent event id when this event is a child of a root event
    #[serde(default, deserialize_with = "de_id")]
    pub parent_event_id: Option<String>,
    /// Constituent markets
    #[serde(default)]
    pub markets: Vec<RawMarket>,
}

impl GammaEvent {
    /// Human-readable title, falling back through name to a placeholder
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Polymarket event")
    }
}

/// A market record as returned by the Gamma API, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarket {
    #[serde(default, deserialize_with = "de_id")]
    pub id: Option<String>,
    /// Alternate id field used by some event payloads
    #[serde(default, rename = "market_id", deserialize_with = "de_id")]
    pub market_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub group_item_title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub closed: bool,
    /// UMA resolution status; "proposed" marks a pending proposal
    #[serde(default)]
    pub uma_resolution_status: Option<String>,
    #[serde(default)]
    pub uma_status: Option<String>,
}

impl RawMarket {
    /// Canonical string id, from either id field. `"0"` is a valid id;
    /// an empty string counts as missing.
    pub fn canonical_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.market_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Accept an id as a JSON string or number, normalized to a string
fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_decodes_numeric_ids() {
        let event: GammaEvent = serde_json::from_str(
            r#"{"id": 903193, "parentEventId": "100", "markets": [{"id": 0}]}"#,
        )
        .unwrap();
        assert_eq!(event.id.as_deref(), Some("903193"));
        assert_eq!(event.parent_event_id.as_deref(), Some("100"));
        assert_eq!(event.markets[0].canonical_id(), Some("0"));
    }

    #[test]
    fn test_market_id_fallback_field() {
        let market: RawMarket = serde_json::from_str(r#"{"market_id": "42"}"#).unwrap();
        assert_eq!(market.canonical_id(), Some("42"));
    }

    #[test]
    fn test_empty_id_counts_as_missing() {
        let market: RawMarket = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert_eq!(market.canonical_id(), None);
    }

    #[test]
    fn test_display_title_fallback_chain() {
        let event: GammaEvent = serde_json::from_str(r#"{"id": "1", "name": "Named"}"#).unwrap();
        assert_eq!(event.display_title(), "Named");

        let bare: GammaEvent = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(bare.display_title(), "Polymarket event");
    }
}
