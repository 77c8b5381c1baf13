use common::{MarketSnapshot, Signal};

use crate::indicators::average_true_range;
use crate::{Strategy, StrategyError, StrategyParams};

/// Breakout of an ATR band around the previous close.
///
/// `upper = previous_close + atr * volatility_factor`,
/// `lower = previous_close - atr * volatility_factor`.
#[derive(Debug, Clone)]
pub struct VolatilityBreakout {
    name: String,
    lookback_period: usize,
    volatility_factor: f64,
}

impl VolatilityBreakout {
    pub const DEFAULT_NAME: &'static str = "Volatility Breakout";
    pub const DEFAULT_LOOKBACK_PERIOD: usize = 20;
    pub const DEFAULT_VOLATILITY_FACTOR: f64 = 1.5;

    pub fn new(
        name: impl Into<String>,
        lookback_period: usize,
        volatility_factor: f64,
    ) -> Result<Self, StrategyError> {
        let name = name.into();
        if lookback_period < 2 {
            return Err(StrategyError::invalid(&name, "lookback_period must be at least 2"));
        }
        if !volatility_factor.is_finite() || volatility_factor <= 0.0 {
            return Err(StrategyError::invalid(
                &name,
                format!("volatility_factor must be a positive number, got {volatility_factor}"),
            ));
        }
        Ok(Self { name, lookback_period, volatility_factor })
    }

    fn check_aligned(
        &self,
        series: &'static str,
        values: &[f64],
        expected: usize,
    ) -> Result<(), StrategyError> {
        if values.is_empty() || values.len() == expected {
            return Ok(());
        }
        Err(StrategyError::MisalignedSeries {
            strategy: self.name.clone(),
            series,
            expected,
            actual: values.len(),
        })
    }
}

impl Default for VolatilityBreakout {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            lookback_period: Self::DEFAULT_LOOKBACK_PERIOD,
            volatility_factor: Self::DEFAULT_VOLATILITY_FACTOR,
        }
    }
}

impl Strategy for VolatilityBreakout {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> StrategyParams {
        StrategyParams::VolatilityBreakout {
            lookback_period: self.lookback_period,
            volatility_factor: self.volatility_factor,
        }
    }

    fn evaluate(&self, snapshot: &MarketSnapshot) -> Result<Signal, StrategyError> {
        let closes = snapshot.prices();
        if closes.len() < self.lookback_period {
            return Ok(Signal::insufficient_data(closes.len(), self.lookback_period));
        }
        let &[.., previous_close, current_price] = closes else {
            return Ok(Signal::insufficient_data(closes.len(), 2));
        };

        self.check_aligned("highs", snapshot.highs(), closes.len())?;
        self.check_aligned("lows", snapshot.lows(), closes.len())?;

        let atr = average_true_range(snapshot.highs(), snapshot.lows(), closes, self.lookback_period);
        let upper_band = previous_close + atr * self.volatility_factor;
        let lower_band = previous_close - atr * self.volatility_factor;

        let signal = if current_price > upper_band {
            Signal::buy(format!(
                "Price ({current_price:.2}) broke above upper band ({upper_band:.2})"
            ))
        } else if current_price < lower_band {
            Signal::sell(format!(
                "Price ({current_price:.2}) broke below lower band ({lower_band:.2})"
            ))
        } else {
            Signal::hold(format!("Price ({current_price:.2}) within volatility bands"))
        };

        Ok(signal
            .with_metric("atr", atr)
            .with_metric("upper_band", upper_band)
            .with_metric("lower_band", lower_band))
    }
}
