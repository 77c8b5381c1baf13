/// Simple moving average of the last `window` values in `data`.
///
/// When `data` is shorter than `window` the whole slice is averaged.
/// Returns `None` for an empty slice or a zero window.
pub fn sma(data: &[f64], window: usize) -> Option<f64> {
    if data.is_empty() || window == 0 {
        return None;
    }
    let tail = &data[data.len().saturating_sub(window)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_uses_only_trailing_window() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((sma(&prices, 2).unwrap() - 4.5).abs() < 1e-12);
        assert!((sma(&prices, 5).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sma_averages_available_history_when_window_is_longer() {
        let prices = [2.0, 4.0];
        assert!((sma(&prices, 10).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sma_none_on_empty_input() {
        assert!(sma(&[], 3).is_none());
        assert!(sma(&[1.0], 0).is_none());
    }
}
