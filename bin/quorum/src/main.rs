use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, MarketDataSource, MarketSnapshot};
use feed::{poll_feed, FileFeed};
use strategy::{ConsensusResult, StrategyFileConfig, StrategyManager};

#[tokio::main]
async fn main() -> common::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    info!(
        market_data = %cfg.market_data_path,
        strategies = ?cfg.strategy_config_path,
        "Quorum starting"
    );

    // ── Strategies ────────────────────────────────────────────────────────────
    let manager = match &cfg.strategy_config_path {
        Some(path) => StrategyManager::from_config(&StrategyFileConfig::load(path)?)?,
        None => {
            info!("No STRATEGY_CONFIG_PATH set, using default strategies");
            let mut manager = StrategyManager::with_default_strategies()?;
            let names: Vec<String> =
                manager.strategy_names().iter().map(|n| n.to_string()).collect();
            for name in &names {
                manager.activate(name);
            }
            manager
        }
    };

    if manager.active_strategies().is_empty() {
        warn!("No active strategies, every consensus will be HOLD");
    }

    // ── Channels ──────────────────────────────────────────────────────────────
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<MarketSnapshot>(16);
    let (consensus_tx, mut consensus_rx) = mpsc::channel::<ConsensusResult>(16);

    // ── Market data ───────────────────────────────────────────────────────────
    let source: Arc<dyn MarketDataSource> = Arc::new(FileFeed::new(&cfg.market_data_path));

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    tokio::spawn(poll_feed(source, cfg.poll_interval, snapshot_tx));
    tokio::spawn(manager.run(snapshot_rx, consensus_tx));

    // ── Consensus reporter ────────────────────────────────────────────────────
    tokio::spawn(async move {
        while let Some(consensus) = consensus_rx.recv().await {
            log_consensus(&consensus);
        }
    });

    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting.");
    Ok(())
}

fn log_consensus(consensus: &ConsensusResult) {
    for (name, signal) in &consensus.details {
        info!(
            strategy = %name,
            signal = %signal.kind(),
            reason = signal.reason(),
            "Strategy verdict"
        );
    }

    info!(
        signal = %consensus.signal,
        buy = consensus.buy_count,
        sell = consensus.sell_count,
        hold = consensus.hold_count,
        reason = %consensus.reason,
        "Consensus"
    );
}
