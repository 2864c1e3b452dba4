//! RSI (Relative Strength Index).
//!
//! Wilder's smoothing for average gain/loss:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)); avg_loss == 0 → 100.
//! Warmup: the first n points are invalid (n price changes are needed for
//! the initial average).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], window: usize) -> IndicatorSeries {
    if window == 0 || bars.len() < 2 {
        let values: Vec<IndicatorPoint> = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            })
            .collect();

        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(window),
            values,
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    values.push(IndicatorPoint {
        date: bars[0].date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    });

    let mut gains: Vec<f64> = Vec::with_capacity(bars.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(bars.len() - 1);

    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, bar) in bars.iter().enumerate().skip(1) {
        let change_idx = i - 1;

        if change_idx < window - 1 {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
            continue;
        }

        if change_idx == window - 1 {
            avg_gain = gains[..window].iter().sum::<f64>() / window as f64;
            avg_loss = losses[..window].iter().sum::<f64>() / window as f64;
        } else {
            avg_gain = (avg_gain * (window - 1) as f64 + gains[change_idx]) / window as f64;
            avg_loss = (avg_loss * (window - 1) as f64 + losses[change_idx]) / window as f64;
        }

        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        };
        values.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(rsi),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(window),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            code: "588000".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| make_bar(i as u32 + 1, c))
            .collect()
    }

    #[test]
    fn rsi_empty_bars() {
        let series = calculate_rsi(&[], 14);
        assert!(series.values.is_empty());
    }

    #[test]
    fn rsi_single_bar() {
        let series = calculate_rsi(&[make_bar(1, 100.0)], 14);
        assert_eq!(series.values.len(), 1);
        assert!(!series.values[0].valid);
    }

    #[test]
    fn rsi_warmup_window() {
        let bars = make_bars(&(0..15).map(|i| 100.0 + (i % 5) as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);

        assert_eq!(series.values.len(), 15);
        for i in 0..14 {
            assert!(!series.values[i].valid, "point {} should be invalid", i);
        }
        assert!(series.values[14].valid);
    }

    #[test]
    fn rsi_exactly_window_minus_one_bars_all_invalid() {
        let bars = make_bars(&(0..13).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn rsi_saturates_at_100_on_monotone_rise() {
        let bars = make_bars(&(0..20).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);
        let rsi = series.latest_simple().unwrap();
        assert!((rsi - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_saturates_at_0_on_monotone_fall() {
        let bars = make_bars(&(0..20).map(|i| 100.0 - i as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);
        let rsi = series.latest_simple().unwrap();
        assert!(rsi.abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=25)
            .map(|i| 100.0 + ((i % 7) as f64 - 3.0) * 2.0)
            .collect();
        let series = calculate_rsi(&make_bars(&closes), 14);

        for point in &series.values {
            if point.valid {
                if let IndicatorValue::Simple(rsi) = point.value {
                    assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
                }
            }
        }
    }

    #[test]
    fn rsi_seed_is_simple_mean() {
        // window 2: changes +4, -2 → avg_gain 2, avg_loss 1 → RS 2
        let bars = make_bars(&[10.0, 14.0, 12.0]);
        let series = calculate_rsi(&bars, 2);
        let rsi = series.simple_at(2).unwrap();
        let expected = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((rsi - expected).abs() < 1e-12);
    }

    #[test]
    fn rsi_zero_window() {
        let series = calculate_rsi(&make_bars(&[100.0, 101.0]), 0);
        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn rsi_indicator_type() {
        let series = calculate_rsi(&make_bars(&[100.0]), 14);
        assert_eq!(series.indicator_type, IndicatorType::Rsi(14));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rsi_always_within_bounds(
                closes in proptest::collection::vec(1.0f64..1000.0, 2..28),
                window in 1usize..20,
            ) {
                let series = calculate_rsi(&make_bars(&closes), window);
                for point in &series.values {
                    if point.valid {
                        if let IndicatorValue::Simple(rsi) = point.value {
                            prop_assert!((0.0..=100.0).contains(&rsi));
                        }
                    }
                }
            }
        }
    }
}
