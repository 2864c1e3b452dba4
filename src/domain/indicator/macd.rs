//! MACD (Moving Average Convergence Divergence).
//!
//! DIF = EMA(short) - EMA(long)
//! DEA = EMA(DIF, signal) — the signal line
//!
//! Both lines use the seed-from-first-value EMA convention, so every
//! point is defined from the first bar onward. Defaults: 12/26/9.

use crate::domain::indicator::ema::ema_recurrence;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    short: usize,
    long: usize,
    signal: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        short,
        long,
        signal,
    };
    let usable = short > 0 && long > 0 && signal > 0;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_short = ema_recurrence(&closes, short);
    let ema_long = ema_recurrence(&closes, long);

    let dif: Vec<f64> = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(s, l)| s - l)
        .collect();
    let dea = ema_recurrence(&dif, signal);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            valid: usable,
            value: IndicatorValue::Macd {
                dif: dif[i],
                dea: dea[i],
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

/// Latest (DIF, DEA) pair, if defined and finite.
pub fn latest_macd(series: &IndicatorSeries) -> Option<(f64, f64)> {
    match series.latest_valid()?.value {
        IndicatorValue::Macd { dif, dea } if dif.is_finite() && dea.is_finite() => {
            Some((dif, dea))
        }
        _ => None,
    }
}
