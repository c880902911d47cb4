//! Oracle proposal records and derived display data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chain id used in propose-action portal links
const PORTAL_CHAIN_ID: u32 = 137;

/// Mapping from market id to its ordered proposal list. One chunk of this
/// shape is produced per completed batch; the full run returns their union.
pub type ProposalMap = BTreeMap<String, Vec<Proposal>>;

/// Visual classification of a proposal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateClass {
    Positive,
    Warning,
    Neutral,
}

/// An optimistic-oracle price request/proposal, newest-first per market
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub proposer: Option<String>,
    #[serde(default)]
    pub disputer: Option<String>,
    #[serde(default)]
    pub proposed_price: Option<String>,
    #[serde(default)]
    pub request_timestamp: Option<String>,
    #[serde(default)]
    pub proposal_timestamp: Option<String>,
    #[serde(default)]
    pub request_hash: Option<String>,
    #[serde(default)]
    pub request_log_index: Option<String>,
}

impl Proposal {
    /// Classify the state for display. Proposed and settled requests are
    /// positive, disputed and closed ones warrant attention.
    pub fn state_class(&self) -> StateClass {
        match self
            .state
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "proposed" | "settled" => StateClass::Positive,
            "disputed" | "closed" => StateClass::Warning,
            _ => StateClass::Neutral,
        }
    }

    /// External inspection URL for this proposal.
    ///
    /// Requires both a transaction hash and a log index (non-empty after
    /// trimming). Requests still in the `requested` state link to the propose
    /// action, everything else to the general lookup form.
    pub fn portal_url(&self) -> Option<String> {
        let tx_hash = self.request_hash.as_deref().unwrap_or_default().trim();
        let log_index = self.request_log_index.as_deref().unwrap_or_default().trim();
        if tx_hash.is_empty() || log_index.is_empty() {
            return None;
        }

        let state = self.state.as_deref().unwrap_or_default().to_lowercase();
        if state == "requested" {
            Some(format!(
                "https://oracle.uma.xyz/propose?project=Polymarket&transactionHash={tx_hash}&eventIndex={log_index}&chainId={PORTAL_CHAIN_ID}"
            ))
        } else {
            Some(format!(
                "https://oracle.uma.xyz/?transactionHash={tx_hash}&eventIndex={log_index}"
            ))
        }
    }

    /// Human-readable timestamp: the proposal time, falling back to the
    /// request time; numeric values render as UTC instants, anything else is
    /// passed through, absence shows as an em dash.
    pub fn display_timestamp(&self) -> String {
        let raw = self
            .proposal_timestamp
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.request_timestamp.as_deref().filter(|t| !t.is_empty()));

        match raw {
            None => "—".to_string(),
            Some(value) => match value.parse::<i64>() {
                Ok(seconds) => DateTime::<Utc>::from_timestamp(seconds, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|| value.to_string()),
                Err(_) => value.to_string(),
            },
        }
    }
}
