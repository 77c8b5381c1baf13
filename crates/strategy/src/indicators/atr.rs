/// True ranges of the bars preceding the latest one.
///
/// Walks back from the most recent bar: offset `1` is the second-to-last bar,
/// up to offset `lookback - 1`. Each range is
/// `max(high - low, |high - prior_close|, |low - prior_close|)` where
/// `prior_close` is the close one bar before the examined bar. Offsets whose
/// prior close would fall before the start of the series are skipped.
///
/// The three slices are expected to be aligned; only their common length is used.
pub fn true_ranges(highs: &[f64], lows: &[f64], closes: &[f64], lookback: usize) -> Vec<f64> {
    let len = closes.len().min(highs.len()).min(lows.len());
    let upper = lookback.min(len.saturating_sub(1));

    (1..upper)
        .map(|offset| {
            let bar = len - 1 - offset;
            let prior_close = closes[bar - 1];
            let (high, low) = (highs[bar], lows[bar]);
            (high - low)
                .max((high - prior_close).abs())
                .max((low - prior_close).abs())
        })
        .collect()
}

/// Mean of [`true_ranges`]; `0.0` when no range can be computed.
pub fn average_true_range(highs: &[f64], lows: &[f64], closes: &[f64], lookback: usize) -> f64 {
    let ranges = true_ranges(highs, lows, closes, lookback);
    if ranges.is_empty() {
        return 0.0;
    }
    ranges.iter().sum::<f64>() / ranges.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_latest_bar_and_needs_prior_close() {
        let closes = [10.0, 11.0, 12.0, 13.0];
        let highs = [10.5, 11.5, 12.5, 50.0];
        let lows = [9.5, 10.5, 11.5, 1.0];
        // Offsets 1 and 2 (bars 2 and 1); bar 0 has no prior close
        let ranges = true_ranges(&highs, &lows, &closes, 10);
        assert_eq!(ranges.len(), 2);
        // bar 2: high 12.5, low 11.5, prior close 11.0 -> max(1.0, 1.5, 0.5)
        assert!((ranges[0] - 1.5).abs() < 1e-12);
        // bar 1: high 11.5, low 10.5, prior close 10.0 -> max(1.0, 1.5, 0.5)
        assert!((ranges[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn lookback_caps_number_of_ranges() {
        let closes = vec![100.0; 30];
        let ranges = true_ranges(&closes, &closes, &closes, 5);
        assert_eq!(ranges.len(), 4);
    }

    #[test]
    fn empty_highs_give_zero_atr() {
        let closes = [1.0, 2.0, 3.0];
        assert_eq!(average_true_range(&[], &[], &closes, 3), 0.0);
    }

    #[test]
    fn flat_market_has_zero_atr() {
        let flat = vec![42.0; 25];
        assert_eq!(average_true_range(&flat, &flat, &flat, 20), 0.0);
    }
}
