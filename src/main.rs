//! uma-scout - Main Entry Point
//!
//! Resolves a Polymarket event and prints its markets' recent UMA oracle
//! proposals to the terminal as each batch completes.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use uma_scout::config::loader::load_config;
use uma_scout::oracle::types::{ProposalMap, StateClass};
use uma_scout::pipeline::{ProposalSink, ResolutionPipeline, ResolvedEvent, RunOptions};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Event slug, full Polymarket URL, or numeric event id
    input: String,

    /// Include closed markets
    #[arg(long)]
    include_closed: bool,

    /// Include markets whose resolution is already proposed
    #[arg(long)]
    include_proposed: bool,

    /// Markets per bulk subgraph query
    #[arg(long)]
    batch_size: Option<usize>,

    /// Chain key selecting the oracle subgraph (polygon, amoy)
    #[arg(long)]
    chain: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Terminal presentation sink: rows up front, proposal lines per chunk
#[derive(Default)]
struct TerminalSink {
    /// Labels by market id so chunk lines can name the market
    labels: std::collections::HashMap<String, String>,
}

impl ProposalSink for TerminalSink {
    fn status(&mut self, message: &str) {
        eprintln!("* {message}");
    }

    fn events(&mut self, events: &[ResolvedEvent]) {
        for entry in events {
            let subtitle = entry
                .event
                .slug
                .as_deref()
                .or(entry.event.id.as_deref())
                .unwrap_or("?");
            println!("{} ({subtitle})", entry.event.display_title());
            for market in &entry.markets {
                println!("  [{}] {} (id {})", market.state, market.label, market.id);
                self.labels
                    .entry(market.id.clone())
                    .or_insert_with(|| market.label.clone());
            }
        }
    }

    fn chunk(&mut self, chunk: &ProposalMap) {
        for (market_id, proposals) in chunk {
            let label = self
                .labels
                .get(market_id)
                .map(String::as_str)
                .unwrap_or(market_id);
            if proposals.is_empty() {
                println!("  {label}: no UMA requests yet");
                continue;
            }
            for proposal in proposals {
                let state = proposal.state.as_deref().unwrap_or("?");
                let marker = match proposal.state_class() {
                    StateClass::Positive => "+",
                    StateClass::Warning => "!",
                    StateClass::Neutral => " ",
                };
                match proposal.portal_url() {
                    Some(url) => println!(
                        "  {label}: {marker} {state} @ {} -> {url}",
                        proposal.display_timestamp()
                    ),
                    None => println!(
                        "  {label}: {marker} {state} @ {} (missing tx hash/index)",
                        proposal.display_timestamp()
                    ),
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;
    info!("Configuration loaded from {}", args.config);

    let pipeline = ResolutionPipeline::new(config)?;
    let options = RunOptions {
        include_closed: args.include_closed,
        include_proposed: args.include_proposed,
        batch_size: args.batch_size,
        chain: args.chain,
    };

    let mut sink = TerminalSink::default();
    match pipeline.run(&args.input, &options, &mut sink).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
