use common::{MarketSnapshot, Signal};

use crate::{Strategy, StrategyError, StrategyParams};

/// A registered strategy together with its lifecycle state.
///
/// Only `StrategyManager` flips `active`; `last_signal` is overwritten by
/// every successful evaluation.
pub struct ManagedStrategy {
    strategy: Box<dyn Strategy>,
    active: bool,
    last_signal: Option<Signal>,
}

impl ManagedStrategy {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy,
            active: false,
            last_signal: None,
        }
    }

    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    pub fn params(&self) -> StrategyParams {
        self.strategy.params()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Most recent signal, `None` before the first evaluation.
    pub fn last_signal(&self) -> Option<&Signal> {
        self.last_signal.as_ref()
    }

    pub(crate) fn activate(&mut self) {
        self.active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Evaluate and remember the result. A failed evaluation keeps the
    /// previous `last_signal`.
    pub(crate) fn analyze(&mut self, snapshot: &MarketSnapshot) -> Result<Signal, StrategyError> {
        let signal = self.strategy.evaluate(snapshot)?;
        self.last_signal = Some(signal.clone());
        Ok(signal)
    }
}

impl std::fmt::Debug for ManagedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedStrategy")
            .field("name", &self.name())
            .field("params", &self.params())
            .field("active", &self.active)
            .field("last_signal", &self.last_signal)
            .finish()
    }
}
