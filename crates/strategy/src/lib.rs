pub mod config;
pub mod consensus;
pub mod error;
pub mod indicators;
pub mod managed;
pub mod manager;
pub mod strategies;

pub use config::{StrategyConfig, StrategyFileConfig, StrategyParams};
pub use consensus::{aggregate, ConsensusResult};
pub use error::StrategyError;
pub use managed::ManagedStrategy;
pub use manager::StrategyManager;
pub use strategies::{MovingAverageCrossover, RsiStrategy, VolatilityBreakout};

use common::{MarketSnapshot, Signal};

/// All strategy implementations must satisfy this trait.
pub trait Strategy: Send + Sync {
    /// Name of this strategy instance. Unique within a `StrategyManager`.
    fn name(&self) -> &str;

    /// Parameters the instance was constructed with.
    fn params(&self) -> StrategyParams;

    /// Evaluate the snapshot and produce a verdict.
    ///
    /// Too little history is not an error: implementations return a HOLD
    /// built with `Signal::insufficient_data`. `Err` is reserved for input
    /// the strategy cannot interpret, such as misaligned series.
    fn evaluate(&self, snapshot: &MarketSnapshot) -> Result<Signal, StrategyError>;
}
