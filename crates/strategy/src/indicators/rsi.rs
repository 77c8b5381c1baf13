/// RSI reported when there is not enough history to compute one.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI (Relative Strength Index) indicator.
///
/// Average gain and loss are the simple mean of the last `period` price
/// changes (no Wilder smoothing).
/// Returns `None` until at least `period + 1` close values are available.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl RsiIndicator {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        Self { period, oversold, overbought }
    }

    /// Compute RSI from a slice of close prices (oldest first).
    /// Returns `None` if there are fewer than `period + 1` values.
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        if self.period == 0 || closes.len() < self.period + 1 {
            return None;
        }

        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let recent = &changes[changes.len() - self.period..];

        let avg_gain = recent.iter().map(|c| c.max(0.0)).sum::<f64>() / self.period as f64;
        let avg_loss = recent.iter().map(|c| (-c).max(0.0)).sum::<f64>() / self.period as f64;

        if avg_loss == 0.0 {
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }

    /// Like [`compute`](Self::compute) but falls back to [`NEUTRAL_RSI`].
    pub fn value_or_neutral(&self, closes: &[f64]) -> f64 {
        self.compute(closes).unwrap_or(NEUTRAL_RSI)
    }
}
