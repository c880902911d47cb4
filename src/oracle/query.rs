//! Bulk GraphQL query construction
//!
//! Packs a batch of market ids into a single parametrized query with one
//! aliased sub-query per market, trading one request per market for one
//! request per batch.

use serde::Serialize;
use std::collections::BTreeMap;

use super::needle::encode_needle;

/// Most recent proposals requested per market. The ordering clause in the
/// query is the contract that lists arrive newest-first.
pub const PER_MARKET_LIMIT: usize = 5;

/// A ready-to-POST GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlPayload {
    pub query: String,
    pub variables: BTreeMap<String, String>,
}

/// Build one bulk query for a batch of market ids.
///
/// Each market gets an alias `m{i}` selecting its `PER_MARKET_LIMIT` most
/// recent price requests, filtered by ancillary data containing the bound
/// variable `$needle{i}` (see [`encode_needle`]).
pub fn build_batch_query(batch: &[String]) -> GraphqlPayload {
    let var_defs: Vec<String> = (0..batch.len())
        .map(|idx| format!("$needle{idx}: String!"))
        .collect();

    let fields: Vec<String> = (0..batch.len())
        .map(|idx| {
            format!(
                "  m{idx}: optimisticPriceRequests(first: {PER_MARKET_LIMIT}, \
                 orderBy: requestTimestamp, orderDirection: desc, \
                 where: {{ ancillaryData_contains: $needle{idx} }}) \
                 {{ id state proposer disputer proposedPrice requestTimestamp \
                 proposalTimestamp requestHash requestLogIndex }}"
            )
        })
        .collect();

    let mut variables = BTreeMap::new();
    for (idx, market_id) in batch.iter().enumerate() {
        variables.insert(format!("needle{idx}"), encode_needle(market_id));
    }

    GraphqlPayload {
        query: format!("query({}) {{\n{}\n}}", var_defs.join(", "), fields.join("\n")),
        variables,
    }
}

/// Partition ids into consecutive batches of `size` (the last batch may be
/// smaller), preserving input order.
pub fn chunk_ids(ids: &[String], size: usize) -> Vec<Vec<String>> {
    if size == 0 {
        return vec![ids.to_vec()];
    }
    ids.chunks(size).map(<[String]>::to_vec).collect()
}
