//! Majority-vote reduction of per-strategy signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{Signal, SignalKind};

/// Outcome of one consensus round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub signal: SignalKind,
    pub reason: String,
    pub buy_count: usize,
    pub sell_count: usize,
    pub hold_count: usize,
    /// Each contributing strategy's signal, in evaluation order.
    pub details: Vec<(String, Signal)>,
    pub produced_at: DateTime<Utc>,
}

impl ConsensusResult {
    /// Number of strategies that voted.
    pub fn total(&self) -> usize {
        self.buy_count + self.sell_count + self.hold_count
    }

    pub fn detail(&self, name: &str) -> Option<&Signal> {
        self.details.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}

/// Reduce named signals to one decision.
///
/// BUY needs strictly more votes than both SELL and HOLD; SELL likewise.
/// Everything else, ties included, resolves to HOLD.
pub fn aggregate(signals: Vec<(String, Signal)>) -> ConsensusResult {
    let produced_at = Utc::now();

    if signals.is_empty() {
        return ConsensusResult {
            signal: SignalKind::Hold,
            reason: "no active strategies".to_string(),
            buy_count: 0,
            sell_count: 0,
            hold_count: 0,
            details: signals,
            produced_at,
        };
    }

    let count = |kind: SignalKind| signals.iter().filter(|(_, s)| s.kind() == kind).count();
    let buy_count = count(SignalKind::Buy);
    let sell_count = count(SignalKind::Sell);
    let hold_count = count(SignalKind::Hold);
    let total = signals.len();

    let (signal, reason) = if buy_count > sell_count && buy_count > hold_count {
        (
            SignalKind::Buy,
            format!("majority consensus: {buy_count}/{total} strategies recommend BUY"),
        )
    } else if sell_count > buy_count && sell_count > hold_count {
        (
            SignalKind::Sell,
            format!("majority consensus: {sell_count}/{total} strategies recommend SELL"),
        )
    } else {
        (
            SignalKind::Hold,
            format!("no clear consensus or majority HOLD: {hold_count}/{total} strategies"),
        )
    };

    ConsensusResult {
        signal,
        reason,
        buy_count,
        sell_count,
        hold_count,
        details: signals,
        produced_at,
    }
}
