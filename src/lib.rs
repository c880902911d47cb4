//! uma-scout Library
//!
//! Resolves a Polymarket slug, URL, or event id into its related events,
//! filters their markets, and cross-references each market against the UMA
//! managed optimistic-oracle subgraph, streaming proposal batches to a sink.

pub mod common;
pub mod config;
pub mod gamma;
pub mod input;
pub mod oracle;
pub mod pipeline;
pub mod transport;

// Re-export commonly used types
pub use common::errors::{Result, ScoutError};
pub use config::types::AppConfig;
pub use gamma::events::GammaEvent;
pub use gamma::markets::{collect_markets, Market, MarketState};
pub use gamma::resolver::{EventResolver, RelatedEvents};
pub use input::{parse_input, Target};
pub use oracle::aggregator::OracleAggregator;
pub use oracle::needle::encode_needle;
pub use oracle::query::{build_batch_query, GraphqlPayload, PER_MARKET_LIMIT};
pub use oracle::types::{Proposal, ProposalMap, StateClass};
pub use pipeline::{ProposalSink, ResolutionPipeline, ResolvedEvent, RunOptions};
pub use transport::Transport;
