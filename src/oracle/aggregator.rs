//! Batched proposal aggregation against the oracle subgraph
//!
//! Batches are executed strictly sequentially, so the chunk callback fires in
//! submission order and consumers can update display state without
//! synchronization.

use tracing::{debug, instrument};

use super::query::{build_batch_query, chunk_ids};
use super::types::{Proposal, ProposalMap};
use crate::common::errors::{Result, ScoutError};
use crate::config::types::OracleConfig;
use crate::transport::Transport;

/// Client for the managed optimistic-oracle subgraph
#[derive(Debug, Clone)]
pub struct OracleAggregator {
    /// Fallback-aware transport
    transport: Transport,
    /// Endpoint table and batching defaults
    config: OracleConfig,
}

impl OracleAggregator {
    /// Create an aggregator from configuration
    pub fn new(transport: Transport, config: OracleConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch recent proposals for every market id, merging batch results
    /// into one map.
    ///
    /// Ids are partitioned into consecutive batches of `batch_size` and
    /// executed one at a time. After each batch merges, `on_chunk` is invoked
    /// synchronously with that batch's mapping. A GraphQL `errors` payload
    /// aborts the whole run; chunks already delivered stay valid. Every input
    /// id appears in the returned map, with an empty list when the subgraph
    /// had nothing for it.
    #[instrument(skip(self, market_ids, on_chunk), fields(markets = market_ids.len()))]
    pub async fn fetch_proposals<F>(
        &self,
        market_ids: &[String],
        chain_key: &str,
        batch_size: usize,
        mut on_chunk: F,
    ) -> Result<ProposalMap>
    where
        F: FnMut(&ProposalMap),
    {
        if market_ids.is_empty() {
            return Ok(ProposalMap::new());
        }

        let endpoint = self
            .config
            .endpoint_for(chain_key)
            .ok_or_else(|| {
                ScoutError::Configuration(format!(
                    "no oracle endpoint for chain '{chain_key}' and no default configured"
                ))
            })?
            .to_string();

        let mut results = ProposalMap::new();
        for batch in chunk_ids(market_ids, batch_size) {
            debug!("Querying oracle subgraph for {} market(s)", batch.len());
            let payload = build_batch_query(&batch);
            let response = self.transport.post_json(&endpoint, &payload).await?;

            if let Some(errors) = response.body.get("errors") {
                return Err(ScoutError::GraphQl(errors.to_string()));
            }

            let data = response
                .body
                .get("data")
                .cloned()
                .unwrap_or(serde_json::Value::Null);

            let mut chunk = ProposalMap::new();
            for (idx, market_id) in batch.iter().enumerate() {
                // Absent and null aliases both mean no requests for that market
                let proposals: Vec<Proposal> = match data.get(format!("m{idx}")) {
                    Some(field) if !field.is_null() => serde_json::from_value(field.clone())?,
                    _ => Vec::new(),
                };
                results.insert(market_id.clone(), proposals.clone());
                chunk.insert(market_id.clone(), proposals);
            }

            on_chunk(&chunk);
        }

        Ok(results)
    }
}
