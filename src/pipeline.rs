//! End-to-end resolution pipeline
//!
//! Wires the input parser, event resolver, market filter, and oracle
//! aggregator together and streams results into a [`ProposalSink`]. The run
//! is a single logical thread of control: one outstanding request at a time,
//! batches strictly sequential, no cancellation. Re-entrancy guarding is the
//! caller's concern.

use tracing::{info, instrument};

use crate::common::errors::{Result, ScoutError};
use crate::config::types::AppConfig;
use crate::gamma::events::GammaEvent;
use crate::gamma::markets::{collect_markets, dedup_ids, Market};
use crate::gamma::resolver::EventResolver;
use crate::input::parse_input;
use crate::oracle::aggregator::OracleAggregator;
use crate::oracle::types::ProposalMap;
use crate::transport::Transport;

/// Per-run options, typically sourced from CLI flags
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Keep closed markets in the result set
    pub include_closed: bool,
    /// Keep markets whose resolution is already proposed
    pub include_proposed: bool,
    /// Override the configured batch size (ignored when zero)
    pub batch_size: Option<usize>,
    /// Chain key selecting the oracle endpoint
    pub chain: Option<String>,
}

/// An event paired with its filtered, ordered market rows
#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub event: GammaEvent,
    pub markets: Vec<Market>,
}

/// Consumer of pipeline output. Implementations render however they like;
/// all calls arrive from the single control thread, in order.
pub trait ProposalSink {
    /// Human-readable phase transition or warning
    fn status(&mut self, message: &str);
    /// The deduplicated event list with filtered market rows, once per run
    fn events(&mut self, events: &[ResolvedEvent]);
    /// One completed batch of proposal lookups
    fn chunk(&mut self, chunk: &ProposalMap);
}

/// The resolution-and-aggregation pipeline
#[derive(Debug, Clone)]
pub struct ResolutionPipeline {
    resolver: EventResolver,
    aggregator: OracleAggregator,
    config: AppConfig,
}

impl ResolutionPipeline {
    /// Build a pipeline from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let transport = Transport::new(&config.transport)?;
        let resolver = EventResolver::new(transport.clone(), &config.gamma);
        let aggregator = OracleAggregator::new(transport, config.oracle.clone());
        Ok(Self {
            resolver,
            aggregator,
            config,
        })
    }

    /// Resolve `raw_input` and stream proposals into `sink`.
    ///
    /// Returns the full aggregated mapping once every batch has completed.
    /// Chunks already delivered to the sink remain valid when a later batch
    /// fails.
    #[instrument(skip(self, sink))]
    pub async fn run(
        &self,
        raw_input: &str,
        options: &RunOptions,
        sink: &mut dyn ProposalSink,
    ) -> Result<ProposalMap> {
        let target = parse_input(raw_input).ok_or_else(|| {
            ScoutError::Input("Enter a slug, full URL, or numeric event id.".to_string())
        })?;

        sink.status("Loading Polymarket event…");
        let primary = self.resolver.fetch_primary_event(&target).await?;
        info!("Resolved primary event {:?}", primary.id);

        let related = self.resolver.gather_related_events(primary).await;
        for warning in &related.warnings {
            sink.status(&format!("Warning: {warning}"));
        }

        let resolved: Vec<ResolvedEvent> = related
            .events
            .into_iter()
            .map(|event| {
                let markets =
                    collect_markets(&event, options.include_closed, options.include_proposed);
                ResolvedEvent { event, markets }
            })
            .collect();

        let all_rows: Vec<Market> = resolved
            .iter()
            .flat_map(|entry| entry.markets.iter().cloned())
            .collect();
        if all_rows.is_empty() {
            sink.events(&resolved);
            sink.status("No markets match the selected filters.");
            return Ok(ProposalMap::new());
        }

        sink.events(&resolved);
        sink.status("Fetching UMA proposals…");

        let market_ids = dedup_ids(&all_rows);
        let total = market_ids.len();
        let batch_size = options
            .batch_size
            .filter(|size| *size > 0)
            .unwrap_or(self.config.oracle.batch_size);
        let chain = options
            .chain
            .as_deref()
            .unwrap_or(&self.config.oracle.default_chain);

        let mut resolved_count = 0usize;
        let map = self
            .aggregator
            .fetch_proposals(&market_ids, chain, batch_size, |chunk| {
                resolved_count += chunk.len();
                sink.chunk(chunk);
                sink.status(&format!("Fetched UMA for {resolved_count}/{total} market(s)…"));
            })
            .await?;

        sink.status(&format!("Found {total} market(s)."));
        Ok(map)
    }
}
