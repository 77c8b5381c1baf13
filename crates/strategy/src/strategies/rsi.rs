use common::{MarketSnapshot, Signal};

use crate::indicators::{RsiIndicator, NEUTRAL_RSI};
use crate::{Strategy, StrategyError, StrategyParams};

/// Mean-reversion on RSI extremes.
///
/// BUY on the bar RSI drops below `oversold`, SELL on the bar it rises
/// above `overbought`. Staying in either zone does not re-signal.
#[derive(Debug, Clone)]
pub struct RsiStrategy {
    name: String,
    indicator: RsiIndicator,
}

impl RsiStrategy {
    pub const DEFAULT_NAME: &'static str = "RSI Strategy";
    pub const DEFAULT_PERIOD: usize = 14;
    pub const DEFAULT_OVERSOLD: f64 = 30.0;
    pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

    pub fn new(
        name: impl Into<String>,
        period: usize,
        oversold: f64,
        overbought: f64,
    ) -> Result<Self, StrategyError> {
        let name = name.into();
        if period < 2 {
            return Err(StrategyError::invalid(&name, "period must be at least 2"));
        }
        if !oversold.is_finite() || !overbought.is_finite() {
            return Err(StrategyError::invalid(&name, "thresholds must be finite numbers"));
        }
        if !(0.0 <= oversold && oversold < overbought && overbought <= 100.0) {
            return Err(StrategyError::invalid(
                &name,
                format!("expected 0 <= oversold ({oversold}) < overbought ({overbought}) <= 100"),
            ));
        }
        Ok(Self {
            name,
            indicator: RsiIndicator::new(period, oversold, overbought),
        })
    }
}

impl Default for RsiStrategy {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            indicator: RsiIndicator::new(
                Self::DEFAULT_PERIOD,
                Self::DEFAULT_OVERSOLD,
                Self::DEFAULT_OVERBOUGHT,
            ),
        }
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> StrategyParams {
        StrategyParams::Rsi {
            period: self.indicator.period,
            oversold: self.indicator.oversold,
            overbought: self.indicator.overbought,
        }
    }

    fn evaluate(&self, snapshot: &MarketSnapshot) -> Result<Signal, StrategyError> {
        let prices = snapshot.prices();

        let Some(current_rsi) = self.indicator.compute(prices) else {
            return Ok(Signal::insufficient_data(prices.len(), self.indicator.period + 1)
                .with_metric("rsi", NEUTRAL_RSI));
        };
        let prev_rsi = self.indicator.value_or_neutral(&prices[..prices.len() - 1]);

        let oversold = self.indicator.oversold;
        let overbought = self.indicator.overbought;

        let signal = if current_rsi < oversold && prev_rsi >= oversold {
            Signal::buy(format!("RSI ({current_rsi:.2}) entered oversold territory"))
        } else if current_rsi > overbought && prev_rsi <= overbought {
            Signal::sell(format!("RSI ({current_rsi:.2}) entered overbought territory"))
        } else {
            Signal::hold(format!("RSI ({current_rsi:.2}) not at extreme levels"))
        };

        Ok(signal.with_metric("rsi", current_rsi))
    }
}

#[cfg(test)]
mod tests {
    use common::SignalKind;

    use super::*;

    fn evaluate(strategy: &RsiStrategy, prices: Vec<f64>) -> Signal {
        strategy.evaluate(&MarketSnapshot::from_prices(prices)).unwrap()
    }

    #[test]
    fn rejects_invalid_thresholds() {
        assert!(RsiStrategy::new("rsi", 14, 70.0, 30.0).is_err());
        assert!(RsiStrategy::new("rsi", 14, -1.0, 70.0).is_err());
        assert!(RsiStrategy::new("rsi", 14, 30.0, 101.0).is_err());
        assert!(RsiStrategy::new("rsi", 14, f64::NAN, 70.0).is_err());
        assert!(RsiStrategy::new("rsi", 1, 30.0, 70.0).is_err());
    }

    #[test]
    fn holds_with_neutral_rsi_when_history_is_short() {
        let rsi = RsiStrategy::new("rsi", 3, 30.0, 70.0).unwrap();
        let signal = evaluate(&rsi, vec![1.0, 2.0, 3.0]);
        assert!(signal.is_insufficient_data());
        assert_eq!(signal.metric("rsi"), Some(NEUTRAL_RSI));
    }

    #[test]
    fn monotonic_rise_yields_rsi_100() {
        let rsi = RsiStrategy::default();
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let signal = evaluate(&rsi, prices);
        assert_eq!(signal.metric("rsi"), Some(100.0));
        // Already overbought on the previous bar, so no fresh SELL
        assert_eq!(signal.kind(), SignalKind::Hold);
    }

    #[test]
    fn buys_when_entering_oversold() {
        let rsi = RsiStrategy::new("rsi", 2, 30.0, 70.0).unwrap();
        // Previous RSI (changes +1, +1) = 100; latest changes +1, -10 -> RSI ~9.09
        let signal = evaluate(&rsi, vec![10.0, 11.0, 12.0, 2.0]);
        assert_eq!(signal.kind(), SignalKind::Buy);
    }

    #[test]
    fn sells_when_entering_overbought() {
        let rsi = RsiStrategy::new("rsi", 2, 30.0, 70.0).unwrap();
        // Previous RSI (changes -1, -1) = 0; latest changes -1, +10 -> RSI ~90.9
        let signal = evaluate(&rsi, vec![12.0, 11.0, 10.0, 20.0]);
        assert_eq!(signal.kind(), SignalKind::Sell);
    }

    #[test]
    fn neutral_previous_rsi_counts_as_outside_oversold() {
        let rsi = RsiStrategy::new("rsi", 2, 30.0, 70.0).unwrap();
        // Exactly period + 1 prices: previous RSI falls back to 50
        let signal = evaluate(&rsi, vec![12.0, 11.0, 10.0]);
        assert_eq!(signal.metric("rsi"), Some(0.0));
        assert_eq!(signal.kind(), SignalKind::Buy);
    }
}
