//! Oracle subgraph: needle encoding, bulk queries, batched aggregation

pub mod aggregator;
pub mod needle;
pub mod query;
pub mod types;
