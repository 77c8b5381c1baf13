use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StrategyError;

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "rsi"
/// name = "RSI Aggressive"
///
/// [strategy.params]
/// period = 7
/// oversold = 25
/// overbought = 75
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy", default)]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Strategy type identifier: "ma_crossover", "rsi" or "volatility_breakout".
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Name shown in logs and used as the manager key. Defaults per type.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the strategy is activated right after registration.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Indicator-specific parameters. Missing keys take the type's defaults.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

fn default_active() -> bool {
    true
}

impl StrategyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self, StrategyError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StrategyError::Config(format!("Failed to read strategy config at '{path}': {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            StrategyError::Config(msg) => {
                StrategyError::Config(format!("Failed to parse strategy config at '{path}': {msg}"))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, StrategyError> {
        toml::from_str(content).map_err(|e| StrategyError::Config(e.to_string()))
    }
}

/// Construction parameters of a strategy instance, one variant per algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyParams {
    MovingAverageCrossover {
        short_window: usize,
        long_window: usize,
    },
    Rsi {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
    VolatilityBreakout {
        lookback_period: usize,
        volatility_factor: f64,
    },
}

impl fmt::Display for StrategyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyParams::MovingAverageCrossover { short_window, long_window } => {
                write!(f, "ma_crossover(short={short_window}, long={long_window})")
            }
            StrategyParams::Rsi { period, oversold, overbought } => {
                write!(f, "rsi(period={period}, oversold={oversold}, overbought={overbought})")
            }
            StrategyParams::VolatilityBreakout { lookback_period, volatility_factor } => {
                write!(f, "volatility_breakout(lookback={lookback_period}, factor={volatility_factor})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_file() {
        let cfg = StrategyFileConfig::from_toml_str(
            r#"
            [[strategy]]
            type = "ma_crossover"
            name = "MA Fast"

            [strategy.params]
            short_window = 5
            long_window = 15

            [[strategy]]
            type = "rsi"
            active = false
            "#,
        )
        .unwrap();

        assert_eq!(cfg.strategies.len(), 2);
        assert_eq!(cfg.strategies[0].name.as_deref(), Some("MA Fast"));
        assert!(cfg.strategies[0].active);
        assert_eq!(cfg.strategies[0].params["long_window"].as_integer(), Some(15));
        assert_eq!(cfg.strategies[1].name, None);
        assert!(!cfg.strategies[1].active);
        assert!(cfg.strategies[1].params.is_empty());
    }

    #[test]
    fn empty_file_has_no_strategies() {
        let cfg = StrategyFileConfig::from_toml_str("").unwrap();
        assert!(cfg.strategies.is_empty());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = StrategyFileConfig::from_toml_str("[[strategy]\ntype = ").unwrap_err();
        assert!(matches!(err, StrategyError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = StrategyFileConfig::load("/nonexistent/strategies.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read strategy config"));
    }

    #[test]
    fn params_display_names_the_algorithm() {
        let params = StrategyParams::Rsi { period: 7, oversold: 25.0, overbought: 75.0 };
        assert_eq!(params.to_string(), "rsi(period=7, oversold=25, overbought=75)");
    }
}
