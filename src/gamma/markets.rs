//! Market extraction and filtering
//!
//! Turns raw Gamma market records into normalized rows with stable string
//! identifiers, applying the closed/proposed filters and a human-predictable
//! ordering.

use serde::Serialize;

use super::events::GammaEvent;

/// Display state of a market row. Proposed takes priority over Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketState {
    Open,
    Closed,
    Proposed,
}

impl std::fmt::Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketState::Open => write!(f, "Open"),
            MarketState::Closed => write!(f, "Closed"),
            MarketState::Proposed => write!(f, "Proposed"),
        }
    }
}

/// A normalized market row. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Market {
    /// Canonical string form of the source market id
    pub id: String,
    /// Display label: question, group-item title, or slug
    pub label: String,
    pub closed: bool,
    pub proposed: bool,
    pub state: MarketState,
    pub slug: Option<String>,
    pub uma_status: Option<String>,
}

/// Extract and filter an event's markets into normalized rows.
///
/// Markets without an identifier are skipped (`"0"` is a valid id). Closed
/// and proposed filters apply independently; a market can be both. Rows are
/// ordered ascending by the numeric value of the id when both sides parse,
/// lexicographically otherwise.
pub fn collect_markets(
    event: &GammaEvent,
    include_closed: bool,
    include_proposed: bool,
) -> Vec<Market> {
    let mut rows = Vec::new();

    for market in &event.markets {
        let closed = market.closed;
        if !include_closed && closed {
            continue;
        }
        let proposed = market.uma_resolution_status.as_deref() == Some("proposed");
        if !include_proposed && proposed {
            continue;
        }
        let id = match market.canonical_id() {
            Some(id) => id.to_string(),
            None => continue,
        };

        let label = [
            market.question.as_deref(),
            market.group_item_title.as_deref(),
            market.slug.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Market {id}"));

        let state = if proposed {
            MarketState::Proposed
        } else if closed {
            MarketState::Closed
        } else {
            MarketState::Open
        };

        rows.push(Market {
            id,
            label,
            closed,
            proposed,
            state,
            slug: market.slug.clone().filter(|s| !s.is_empty()),
            uma_status: market
                .uma_status
                .clone()
                .or_else(|| market.uma_resolution_status.clone()),
        });
    }

    rows.sort_by(|a, b| compare_ids(&a.id, &b.id));
    rows
}

/// Numeric comparison when both ids parse as finite numbers, lexicographic
/// otherwise.
fn compare_ids(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(left), Ok(right)) if left.is_finite() && right.is_finite() => {
            left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal)
        }
        _ => a.cmp(b),
    }
}

/// Deduplicate market ids across events, preserving first-occurrence order
pub fn dedup_ids(rows: &[Market]) -> Vec<String> {
    let mut ids = Vec::new();
    for row in rows {
        if !ids.contains(&row.id) {
            ids.push(row.id.clone());
        }
    }
    ids
}
