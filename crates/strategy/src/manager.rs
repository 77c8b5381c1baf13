use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use common::{MarketSnapshot, Signal};

use crate::config::{StrategyConfig, StrategyFileConfig};
use crate::consensus::{aggregate, ConsensusResult};
use crate::strategies::{MovingAverageCrossover, RsiStrategy, VolatilityBreakout};
use crate::{ManagedStrategy, Strategy, StrategyError};

/// Owns every registered strategy, tracks which are active and runs them
/// against the latest market snapshot.
#[derive(Debug, Default)]
pub struct StrategyManager {
    strategies: HashMap<String, ManagedStrategy>,
    /// Active names in activation order. Always a subset of `strategies`.
    active: Vec<String>,
    market_data: Option<MarketSnapshot>,
    last_update: Option<DateTime<Utc>>,
}

impl StrategyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the manager from config, activating entries marked `active`.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self, StrategyError> {
        let mut manager = Self::new();

        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg)?;
            let name = strategy.name().to_string();
            manager.add(strategy);
            if cfg.active {
                manager.activate(&name);
            }
        }

        Ok(manager)
    }

    /// Manager preloaded with the standard strategy set, all inactive.
    pub fn with_default_strategies() -> Result<Self, StrategyError> {
        let mut manager = Self::new();
        manager.add(Box::new(MovingAverageCrossover::new(
            MovingAverageCrossover::DEFAULT_NAME,
            10,
            30,
        )?));
        manager.add(Box::new(MovingAverageCrossover::new("MA Crossover Medium", 20, 50)?));
        manager.add(Box::new(RsiStrategy::default()));
        manager.add(Box::new(RsiStrategy::new("RSI Aggressive", 7, 25.0, 75.0)?));
        manager.add(Box::new(VolatilityBreakout::default()));
        info!(count = manager.strategies.len(), "Created default strategies");
        Ok(manager)
    }

    /// Register a strategy under its name.
    ///
    /// Returns `false` when an existing strategy with the same name was
    /// replaced. A replaced strategy that was active stays active.
    pub fn add(&mut self, strategy: Box<dyn Strategy>) -> bool {
        let name = strategy.name().to_string();
        let mut entry = ManagedStrategy::new(strategy);

        let replaced = self.strategies.contains_key(&name);
        if replaced {
            warn!(name = %name, "Strategy already exists, overwriting");
            if self.active.contains(&name) {
                entry.activate();
            }
        }

        info!(name = %name, params = %entry.params(), "Added strategy");
        self.strategies.insert(name, entry);
        !replaced
    }

    /// Remove a strategy, deactivating it first. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        if !self.strategies.contains_key(name) {
            warn!(name = %name, "Strategy not found");
            return false;
        }

        self.active.retain(|n| n != name);
        self.strategies.remove(name);
        info!(name = %name, "Removed strategy");
        true
    }

    /// Returns `false` for an unknown name. Activating an active strategy is a no-op.
    pub fn activate(&mut self, name: &str) -> bool {
        let Some(entry) = self.strategies.get_mut(name) else {
            error!(name = %name, "Strategy not found");
            return false;
        };

        if !self.active.iter().any(|n| n == name) {
            self.active.push(name.to_string());
            entry.activate();
            info!(name = %name, "Activated strategy");
        }
        true
    }

    /// Returns `false` for an unknown name. Deactivating an inactive strategy is a no-op.
    pub fn deactivate(&mut self, name: &str) -> bool {
        let Some(entry) = self.strategies.get_mut(name) else {
            error!(name = %name, "Strategy not found");
            return false;
        };

        if let Some(pos) = self.active.iter().position(|n| n == name) {
            self.active.remove(pos);
            entry.deactivate();
            info!(name = %name, "Deactivated strategy");
        }
        true
    }

    /// Replace the stored snapshot. Nothing from the previous one is kept.
    pub fn update_market_data(&mut self, snapshot: MarketSnapshot) {
        debug!(bars = snapshot.len(), "Market data updated");
        self.market_data = Some(snapshot);
        self.last_update = Some(Utc::now());
    }

    /// Evaluate every active strategy in activation order.
    ///
    /// Strategies that fail are logged and left out of the result. Returns
    /// an empty list when no snapshot has been supplied yet.
    pub fn run_strategies(&mut self) -> Vec<(String, Signal)> {
        let Some(snapshot) = self.market_data.as_ref() else {
            warn!("No market data available");
            return Vec::new();
        };

        let mut results = Vec::with_capacity(self.active.len());
        for name in &self.active {
            let Some(entry) = self.strategies.get_mut(name) else {
                continue;
            };
            match entry.analyze(snapshot) {
                Ok(signal) => {
                    debug!(
                        strategy = %name,
                        signal = %signal.kind(),
                        reason = signal.reason(),
                        "Strategy signal"
                    );
                    results.push((name.clone(), signal));
                }
                Err(e) => {
                    error!(strategy = %name, error = %e, "Error running strategy");
                }
            }
        }
        results
    }

    /// Run all active strategies and reduce their signals by majority vote.
    pub fn get_consensus(&mut self) -> ConsensusResult {
        aggregate(self.run_strategies())
    }

    pub fn strategy(&self, name: &str) -> Option<&ManagedStrategy> {
        self.strategies.get(name)
    }

    /// Registered names, sorted.
    pub fn strategy_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Active names in activation order.
    pub fn active_strategies(&self) -> &[String] {
        &self.active
    }

    pub fn market_data(&self) -> Option<&MarketSnapshot> {
        self.market_data.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Run the evaluation loop.
    /// Every snapshot read from `snapshot_rx` produces one consensus on `consensus_tx`.
    pub async fn run(
        mut self,
        mut snapshot_rx: mpsc::Receiver<MarketSnapshot>,
        consensus_tx: mpsc::Sender<ConsensusResult>,
    ) {
        info!(
            registered = self.strategies.len(),
            active = self.active.len(),
            "StrategyManager running"
        );

        while let Some(snapshot) = snapshot_rx.recv().await {
            self.update_market_data(snapshot);
            let consensus = self.get_consensus();
            if consensus_tx.send(consensus).await.is_err() {
                warn!("Consensus channel closed, stopping strategy manager");
                return;
            }
        }
        warn!("Market snapshot channel closed");
    }
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(cfg: &StrategyConfig) -> Result<Box<dyn Strategy>, StrategyError> {
    let label = cfg.name.as_deref().unwrap_or(cfg.strategy_type.as_str());

    match cfg.strategy_type.as_str() {
        "ma_crossover" => {
            let name = cfg.name.as_deref().unwrap_or(MovingAverageCrossover::DEFAULT_NAME);
            let short = param_usize(
                cfg,
                label,
                "short_window",
                MovingAverageCrossover::DEFAULT_SHORT_WINDOW,
            )?;
            let long = param_usize(
                cfg,
                label,
                "long_window",
                MovingAverageCrossover::DEFAULT_LONG_WINDOW,
            )?;
            Ok(Box::new(MovingAverageCrossover::new(name, short, long)?))
        }
        "rsi" => {
            let name = cfg.name.as_deref().unwrap_or(RsiStrategy::DEFAULT_NAME);
            let period = param_usize(cfg, label, "period", RsiStrategy::DEFAULT_PERIOD)?;
            let oversold = param_f64(cfg, label, "oversold", RsiStrategy::DEFAULT_OVERSOLD)?;
            let overbought = param_f64(cfg, label, "overbought", RsiStrategy::DEFAULT_OVERBOUGHT)?;
            Ok(Box::new(RsiStrategy::new(name, period, oversold, overbought)?))
        }
        "volatility_breakout" => {
            let name = cfg.name.as_deref().unwrap_or(VolatilityBreakout::DEFAULT_NAME);
            let lookback = param_usize(
                cfg,
                label,
                "lookback_period",
                VolatilityBreakout::DEFAULT_LOOKBACK_PERIOD,
            )?;
            let factor = param_f64(
                cfg,
                label,
                "volatility_factor",
                VolatilityBreakout::DEFAULT_VOLATILITY_FACTOR,
            )?;
            Ok(Box::new(VolatilityBreakout::new(name, lookback, factor)?))
        }
        other => Err(StrategyError::UnknownType(other.to_string())),
    }
}

fn param_f64(
    cfg: &StrategyConfig,
    label: &str,
    key: &str,
    default: f64,
) -> Result<f64, StrategyError> {
    match cfg.params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_float()
            .or_else(|| value.as_integer().map(|v| v as f64))
            .ok_or_else(|| {
                StrategyError::invalid(label, format!("'{key}' must be a number, got {value}"))
            }),
    }
}

fn param_usize(
    cfg: &StrategyConfig,
    label: &str,
    key: &str,
    default: usize,
) -> Result<usize, StrategyError> {
    match cfg.params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_integer()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| {
                StrategyError::invalid(
                    label,
                    format!("'{key}' must be a non-negative integer, got {value}"),
                )
            }),
    }
}
