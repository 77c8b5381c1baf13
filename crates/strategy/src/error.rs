use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("Invalid parameter for strategy '{strategy}': {reason}")]
    InvalidParameter { strategy: String, reason: String },

    #[error("Unknown strategy type '{0}'")]
    UnknownType(String),

    /// A populated auxiliary series does not line up with `prices`.
    #[error("Strategy '{strategy}': {series} has {actual} values, prices has {expected}")]
    MisalignedSeries {
        strategy: String,
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Strategy config error: {0}")]
    Config(String),
}

impl StrategyError {
    pub(crate) fn invalid(strategy: &str, reason: impl Into<String>) -> Self {
        StrategyError::InvalidParameter {
            strategy: strategy.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<StrategyError> for common::Error {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Config(msg) => common::Error::Config(msg),
            other => common::Error::Other(other.to_string()),
        }
    }
}
