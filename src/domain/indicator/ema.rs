//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded from the first close:
//! EMA[0] = C[0], EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//!
//! This is the exponential-weighted-mean recurrence with no
//! minimum-periods gate, so every point is defined; values numerically
//! stabilize after roughly n bars. Not the SMA-seeded variant; the
//! death-cross detector assumes this seeding.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], window: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
    let ema = ema_recurrence(&closes, window);

    let values = dates
        .into_iter()
        .zip(ema)
        .map(|(date, v)| IndicatorPoint {
            date,
            valid: window > 0,
            value: IndicatorValue::Simple(v),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(window),
        values,
    }
}

/// The raw recurrence over any numeric series; also used for the MACD
/// signal line. Returns zeros for window 0 (callers mark those invalid).
pub(crate) fn ema_recurrence(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![0.0; values.len()];
    }
    let k = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = 0.0;
    for (i, &v) in values.iter().enumerate() {
        ema = if i == 0 { v } else { v * k + ema * (1.0 - k) };
        out.push(ema);
    }
    out
}
