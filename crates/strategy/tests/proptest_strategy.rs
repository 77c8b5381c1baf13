use common::{MarketSnapshot, Signal, SignalKind};
use proptest::prelude::*;
use strategy::indicators::RsiIndicator;
use strategy::{
    aggregate, MovingAverageCrossover, RsiStrategy, Strategy, StrategyManager, VolatilityBreakout,
};

fn kind_strategy() -> impl proptest::strategy::Strategy<Value = SignalKind> {
    prop_oneof![
        Just(SignalKind::Buy),
        Just(SignalKind::Sell),
        Just(SignalKind::Hold),
    ]
}

proptest! {
    /// Every strategy evaluates aligned random bars without panicking or erroring.
    #[test]
    fn strategies_never_fail_on_aligned_bars(
        bars in prop::collection::vec((1.0f64..10_000.0, 0.0f64..50.0), 0..80),
    ) {
        let prices: Vec<f64> = bars.iter().map(|(p, _)| *p).collect();
        let highs: Vec<f64> = bars.iter().map(|(p, r)| p + r).collect();
        let lows: Vec<f64> = bars.iter().map(|(p, r)| p - r).collect();
        let snapshot = MarketSnapshot::from_prices(prices).with_highs_lows(highs, lows);

        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(MovingAverageCrossover::new("ma", 5, 20).unwrap()),
            Box::new(RsiStrategy::new("rsi", 7, 25.0, 75.0).unwrap()),
            Box::new(VolatilityBreakout::new("vb", 10, 1.5).unwrap()),
        ];
        for s in &strategies {
            prop_assert!(s.evaluate(&snapshot).is_ok());
        }
    }

    /// Fewer than `long_window` prices always yields the insufficient-data HOLD.
    #[test]
    fn ma_crossover_holds_below_long_window(
        long_window in 2usize..60,
        prices in prop::collection::vec(1.0f64..1000.0, 0..60),
    ) {
        prop_assume!(prices.len() < long_window);
        let ma = MovingAverageCrossover::new("ma", 1, long_window).unwrap();
        let signal = ma.evaluate(&MarketSnapshot::from_prices(prices)).unwrap();
        prop_assert_eq!(signal.kind(), SignalKind::Hold);
        prop_assert!(signal.is_insufficient_data());
    }

    /// RSI stays inside [0, 100].
    #[test]
    fn rsi_is_bounded(
        period in 2usize..20,
        prices in prop::collection::vec(0.01f64..1000.0, 0..100),
    ) {
        let rsi = RsiIndicator::new(period, 30.0, 70.0);
        let value = rsi.value_or_neutral(&prices);
        prop_assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
    }

    /// Counts add up and a directional result always holds a strict majority.
    #[test]
    fn consensus_counts_are_consistent(kinds in prop::collection::vec(kind_strategy(), 0..30)) {
        let signals: Vec<(String, Signal)> = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| (format!("s{i}"), Signal::new(k, "prop")))
            .collect();
        let result = aggregate(signals);

        prop_assert_eq!(result.total(), kinds.len());
        prop_assert_eq!(result.details.len(), kinds.len());
        match result.signal {
            SignalKind::Buy => {
                prop_assert!(result.buy_count > result.sell_count);
                prop_assert!(result.buy_count > result.hold_count);
            }
            SignalKind::Sell => {
                prop_assert!(result.sell_count > result.buy_count);
                prop_assert!(result.sell_count > result.hold_count);
            }
            SignalKind::Hold => {
                let buy_wins = result.buy_count > result.sell_count && result.buy_count > result.hold_count;
                let sell_wins = result.sell_count > result.buy_count && result.sell_count > result.hold_count;
                prop_assert!(!buy_wins && !sell_wins);
            }
        }
    }

    /// Lifecycle calls in any order keep the active set a subset of the registry.
    #[test]
    fn lifecycle_ops_keep_active_subset(ops in prop::collection::vec((0u8..4, 0usize..3), 0..40)) {
        let names = ["MA Crossover", "RSI Strategy", "Volatility Breakout"];
        let mut manager = StrategyManager::new();

        for (op, idx) in ops {
            let name = names[idx];
            match op {
                0 => {
                    let strategy: Box<dyn Strategy> = match idx {
                        0 => Box::new(MovingAverageCrossover::default()),
                        1 => Box::new(RsiStrategy::default()),
                        _ => Box::new(VolatilityBreakout::default()),
                    };
                    manager.add(strategy);
                }
                1 => { manager.remove(name); }
                2 => { manager.activate(name); }
                _ => { manager.deactivate(name); }
            }

            for active in manager.active_strategies() {
                let entry = manager.strategy(active);
                prop_assert!(entry.is_some());
                prop_assert!(entry.unwrap().is_active());
            }
        }
    }
}
