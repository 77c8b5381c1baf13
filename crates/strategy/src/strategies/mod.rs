pub mod ma_crossover;
pub mod rsi;
pub mod volatility_breakout;

pub use ma_crossover::MovingAverageCrossover;
pub use rsi::RsiStrategy;
pub use volatility_breakout::VolatilityBreakout;
