//! Pure indicator math over price/volume series. No I/O, no shared state;
//! every function is deterministic over its inputs.

use crate::config::RSI_PERIOD;
use crate::types::AggregateBar;

/// Wilder-style single-window RSI.
///
/// Fewer than `RSI_PERIOD` closes returns the neutral 50 — an
/// "insufficient data" sentinel, not an error. The window is the FIRST
/// `RSI_PERIOD` samples of the series, not a trailing one: callers must
/// pass the exact series they want windowed. A flat window (zero gains and
/// zero losses) also reads as neutral rather than overbought.
pub fn compute_rsi(closes: &[f64]) -> f64 {
    if closes.len() < RSI_PERIOD {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..RSI_PERIOD {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses += -change;
        }
    }

    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;

    if avg_gain == 0.0 && avg_loss == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Volume-weighted average price over the given bars, using the typical
/// price `(high + low + close) / 3` per bar.
///
/// Empty input returns 0. If total volume is 0 the last bar's close is
/// returned instead of dividing by zero.
pub fn compute_vwap(bars: &[AggregateBar]) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }

    let mut sum_pv = 0.0;
    let mut sum_v = 0.0;
    for bar in bars {
        let typical_price = (bar.high + bar.low + bar.close) / 3.0;
        sum_pv += typical_price * bar.volume;
        sum_v += bar.volume;
    }

    if sum_v > 0.0 {
        sum_pv / sum_v
    } else {
        bars[bars.len() - 1].close
    }
}

/// Percent change of `current` vs `base`. Callers must guard `base == 0`.
pub fn percent_change(current: f64, base: f64) -> f64 {
    (current - base) / base * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(high: f64, low: f64, close: f64, volume: f64) -> AggregateBar {
        AggregateBar {
            open: low,
            high,
            low,
            close,
            volume,
            timestamp: 0,
        }
    }

    #[test]
    fn rsi_short_series_is_neutral() {
        assert_eq!(compute_rsi(&[]), 50.0);
        let thirteen: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
        assert_eq!(compute_rsi(&thirteen), 50.0);
    }

    #[test]
    fn rsi_monotonic_increase_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(compute_rsi(&closes), 100.0);
    }

    #[test]
    fn rsi_constant_series_is_neutral() {
        let closes = vec![42.0; 20];
        assert_eq!(compute_rsi(&closes), 50.0);
    }

    #[test]
    fn rsi_matches_hand_computed_value() {
        // Deltas over the first 14 samples: gains sum 8.5, losses sum 3.5,
        // so RS = 17/7 and RSI = 100 - 100/(1 + 17/7) = 100 - 700/24.
        let closes = [
            10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 12.5, 13.0, 12.0, 13.5, 14.0, 13.0, 14.5, 15.0,
        ];
        let expected = 100.0 - 700.0 / 24.0;
        assert!((compute_rsi(&closes) - expected).abs() < 1e-9);
    }

    #[test]
    fn rsi_ignores_samples_beyond_first_window() {
        let mut closes: Vec<f64> =
            vec![10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 12.5, 13.0, 12.0, 13.5, 14.0, 13.0, 14.5, 15.0];
        let base = compute_rsi(&closes);
        closes.extend([1.0, 500.0, 0.25, 999.0]);
        assert_eq!(compute_rsi(&closes), base);
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let monotonic_down: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let rsi = compute_rsi(&monotonic_down);
        assert!((0.0..=100.0).contains(&rsi));
        assert_eq!(rsi, 0.0);

        let mixed = [5.0, 7.0, 3.0, 9.0, 2.0, 8.0, 4.0, 6.0, 5.5, 7.5, 3.5, 6.5, 4.5, 5.0];
        let rsi = compute_rsi(&mixed);
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn vwap_empty_is_zero() {
        assert_eq!(compute_vwap(&[]), 0.0);
    }

    #[test]
    fn vwap_zero_volume_falls_back_to_last_close() {
        let bars = [bar(11.0, 9.0, 10.0, 0.0), bar(13.0, 11.0, 12.5, 0.0)];
        assert_eq!(compute_vwap(&bars), 12.5);
    }

    #[test]
    fn vwap_weights_by_volume() {
        // Typical prices 10 and 20; volumes 1 and 3 → (10 + 60) / 4 = 17.5.
        let bars = [bar(11.0, 9.0, 10.0, 1.0), bar(21.0, 19.0, 20.0, 3.0)];
        assert!((compute_vwap(&bars) - 17.5).abs() < 1e-12);
    }

    #[test]
    fn percent_change_basic() {
        assert!((percent_change(110.0, 100.0) - 10.0).abs() < 1e-12);
        assert!((percent_change(90.0, 100.0) + 10.0).abs() < 1e-12);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
    }
}
