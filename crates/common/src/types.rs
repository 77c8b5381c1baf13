use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the reason attached to HOLD signals produced when a strategy
/// does not yet have enough history to evaluate.
pub const INSUFFICIENT_DATA: &str = "insufficient data";

/// Market data handed to every active strategy for one evaluation round.
///
/// All series are chronological: oldest first, most recent last. `highs`,
/// `lows`, `volumes` and `timestamps` are optional and may be empty; when
/// populated they are aligned index-for-index with `prices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    prices: Vec<f64>,
    #[serde(default)]
    highs: Vec<f64>,
    #[serde(default)]
    lows: Vec<f64>,
    #[serde(default)]
    volumes: Vec<f64>,
    #[serde(default)]
    timestamps: Vec<DateTime<Utc>>,
}

impl MarketSnapshot {
    pub fn from_prices(prices: Vec<f64>) -> Self {
        Self {
            prices,
            ..Self::default()
        }
    }

    pub fn with_highs_lows(mut self, highs: Vec<f64>, lows: Vec<f64>) -> Self {
        self.highs = highs;
        self.lows = lows;
        self
    }

    pub fn with_volumes(mut self, volumes: Vec<f64>) -> Self {
        self.volumes = volumes;
        self
    }

    pub fn with_timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Close prices.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Number of bars, measured on `prices`.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

/// Direction of a strategy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::Hold => write!(f, "HOLD"),
        }
    }
}

/// One strategy's verdict for one evaluation round.
///
/// `metrics` carries the indicator values the verdict was based on
/// (e.g. `short_ma`, `rsi`, `atr`). They are informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    kind: SignalKind,
    reason: String,
    metrics: BTreeMap<String, f64>,
    produced_at: DateTime<Utc>,
}

impl Signal {
    pub fn new(kind: SignalKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            metrics: BTreeMap::new(),
            produced_at: Utc::now(),
        }
    }

    pub fn buy(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Buy, reason)
    }

    pub fn sell(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Sell, reason)
    }

    pub fn hold(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Hold, reason)
    }

    /// HOLD emitted while a strategy is still warming up.
    pub fn insufficient_data(have: usize, need: usize) -> Self {
        Self::hold(format!("{INSUFFICIENT_DATA}: have {have} prices, need {need}"))
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn produced_at(&self) -> DateTime<Utc> {
        self.produced_at
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.kind == SignalKind::Hold && self.reason.starts_with(INSUFFICIENT_DATA)
    }
}
