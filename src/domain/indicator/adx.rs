//! ADX (Average Directional Index), Wilder's method.
//!
//! +DM = high delta when positive and greater than the low delta, else 0;
//! -DM symmetrically from the low delta. +DM/-DM/TR are Wilder-smoothed
//! over the window, +DI/-DI derived from the smoothed sums,
//! DX = 100 * |+DI - -DI| / (+DI + -DI), and ADX is the Wilder-smoothed
//! DX (seeded with the simple mean of the first n DX values).
//!
//! Warmup: invalid until 2n points are available.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_adx(bars: &[OhlcvBar], window: usize) -> IndicatorSeries {
    let n = window;
    let len = bars.len();

    let invalid = |bar: &OhlcvBar| IndicatorPoint {
        date: bar.date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    };

    if n == 0 || len < 2 * n {
        return IndicatorSeries {
            indicator_type: IndicatorType::Adx(n),
            values: bars.iter().map(invalid).collect(),
        };
    }

    // Directional movement and true range; index 0 has no prior bar.
    let mut plus_dm = vec![0.0; len];
    let mut minus_dm = vec![0.0; len];
    let mut tr = vec![0.0; len];
    for i in 1..len {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
        tr[i] = bars[i].true_range(bars[i - 1].close);
    }

    // Wilder running sums over the window, then DX per bar.
    let mut dx = vec![0.0; len];
    let mut s_plus = plus_dm[1..=n].iter().sum::<f64>();
    let mut s_minus = minus_dm[1..=n].iter().sum::<f64>();
    let mut s_tr = tr[1..=n].iter().sum::<f64>();

    for i in n..len {
        if i > n {
            s_plus = s_plus - s_plus / n as f64 + plus_dm[i];
            s_minus = s_minus - s_minus / n as f64 + minus_dm[i];
            s_tr = s_tr - s_tr / n as f64 + tr[i];
        }

        let (plus_di, minus_di) = if s_tr == 0.0 {
            (0.0, 0.0)
        } else {
            (100.0 * s_plus / s_tr, 100.0 * s_minus / s_tr)
        };
        let di_sum = plus_di + minus_di;
        dx[i] = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        };
    }

    let mut values: Vec<IndicatorPoint> = bars[..2 * n - 1].iter().map(invalid).collect();

    // ADX seed: simple mean of the first n DX values.
    let mut adx = dx[n..2 * n].iter().sum::<f64>() / n as f64;
    values.push(IndicatorPoint {
        date: bars[2 * n - 1].date,
        valid: true,
        value: IndicatorValue::Simple(adx),
    });
    for i in 2 * n..len {
        adx = (adx * (n - 1) as f64 + dx[i]) / n as f64;
        values.push(IndicatorPoint {
            date: bars[i].date,
            valid: true,
            value: IndicatorValue::Simple(adx),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Adx(n),
        values,
    }
}
