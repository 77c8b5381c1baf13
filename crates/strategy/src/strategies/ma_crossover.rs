use common::{MarketSnapshot, Signal};

use crate::indicators::sma;
use crate::{Strategy, StrategyError, StrategyParams};

/// Simple moving-average crossover.
///
/// Edge-triggered: BUY only on the bar where the short average moves above
/// the long one, SELL only on the bar where it moves below.
#[derive(Debug, Clone)]
pub struct MovingAverageCrossover {
    name: String,
    short_window: usize,
    long_window: usize,
}

impl MovingAverageCrossover {
    pub const DEFAULT_NAME: &'static str = "MA Crossover";
    pub const DEFAULT_SHORT_WINDOW: usize = 20;
    pub const DEFAULT_LONG_WINDOW: usize = 50;

    pub fn new(
        name: impl Into<String>,
        short_window: usize,
        long_window: usize,
    ) -> Result<Self, StrategyError> {
        let name = name.into();
        if short_window == 0 {
            return Err(StrategyError::invalid(&name, "short_window must be at least 1"));
        }
        if short_window >= long_window {
            return Err(StrategyError::invalid(
                &name,
                format!("short_window ({short_window}) must be less than long_window ({long_window})"),
            ));
        }
        Ok(Self { name, short_window, long_window })
    }
}

impl Default for MovingAverageCrossover {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            short_window: Self::DEFAULT_SHORT_WINDOW,
            long_window: Self::DEFAULT_LONG_WINDOW,
        }
    }
}

impl Strategy for MovingAverageCrossover {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> StrategyParams {
        StrategyParams::MovingAverageCrossover {
            short_window: self.short_window,
            long_window: self.long_window,
        }
    }

    fn evaluate(&self, snapshot: &MarketSnapshot) -> Result<Signal, StrategyError> {
        let prices = snapshot.prices();
        if prices.len() < self.long_window {
            return Ok(Signal::insufficient_data(prices.len(), self.long_window));
        }

        // Same averages one bar earlier
        let previous = &prices[..prices.len() - 1];

        let (Some(short_ma), Some(long_ma), Some(prev_short_ma), Some(prev_long_ma)) = (
            sma(prices, self.short_window),
            sma(prices, self.long_window),
            sma(previous, self.short_window),
            sma(previous, self.long_window),
        ) else {
            return Ok(Signal::insufficient_data(prices.len(), self.long_window + 1));
        };

        let signal = if short_ma > long_ma && prev_short_ma <= prev_long_ma {
            Signal::buy(format!(
                "Short MA ({short_ma:.2}) crossed above Long MA ({long_ma:.2})"
            ))
        } else if short_ma < long_ma && prev_short_ma >= prev_long_ma {
            Signal::sell(format!(
                "Short MA ({short_ma:.2}) crossed below Long MA ({long_ma:.2})"
            ))
        } else {
            Signal::hold("No crossover detected")
        };

        Ok(signal
            .with_metric("short_ma", short_ma)
            .with_metric("long_ma", long_ma))
    }
}
