use std::time::Duration;

use crate::{Error, Result};

/// Poll interval used when `POLL_INTERVAL_SECS` is not set.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Process configuration loaded from environment variables at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file holding the latest market snapshot.
    pub market_data_path: String,

    /// TOML strategy file. `None` means run the built-in default strategy set.
    pub strategy_config_path: Option<String>,

    /// How often the feed is re-read.
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let poll_interval_secs = match lookup("POLL_INTERVAL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "POLL_INTERVAL_SECS must be a whole number of seconds, got: '{raw}'"
                ))
            })?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        if poll_interval_secs == 0 {
            return Err(Error::Config("POLL_INTERVAL_SECS must be greater than 0".into()));
        }

        Ok(Config {
            market_data_path: required(&lookup, "MARKET_DATA_PATH")?,
            strategy_config_path: lookup("STRATEGY_CONFIG_PATH").filter(|p| !p.trim().is_empty()),
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| {
        Error::Config(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}
