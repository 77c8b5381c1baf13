pub mod atr;
pub mod rsi;
pub mod sma;

pub use atr::{average_true_range, true_ranges};
pub use rsi::{RsiIndicator, NEUTRAL_RSI};
pub use sma::sma;
