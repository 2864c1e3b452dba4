//! ATR (Average True Range) as a plain rolling mean.
//!
//! TR = max(high - low, |high - prev_close|, |low - prev_close|); the
//! first bar has no prior close and uses high - low. ATR is the simple
//! mean of TR over the trailing window — not Wilder-smoothed, which is
//! what the ADX uses internally for its own TR.
//!
//! Warmup: the first window-1 points are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_atr(bars: &[OhlcvBar], window: usize) -> IndicatorSeries {
    if window == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Atr(window),
            values: bars
                .iter()
                .map(|b| IndicatorPoint {
                    date: b.date,
                    valid: false,
                    value: IndicatorValue::Simple(0.0),
                })
                .collect(),
        };
    }

    let mut tr_values: Vec<f64> = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let tr = if i == 0 {
            bar.high - bar.low
        } else {
            bar.true_range(bars[i - 1].close)
        };
        tr_values.push(tr);
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i + 1 < window {
                IndicatorPoint {
                    date: bar.date,
                    valid: false,
                    value: IndicatorValue::Simple(0.0),
                }
            } else {
                let mean =
                    tr_values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                IndicatorPoint {
                    date: bar.date,
                    valid: true,
                    value: IndicatorValue::Simple(mean),
                }
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Atr(window),
        values,
    }
}
