//! EMA death-cross detection: a state transition on the single most
//! recent step, not a historical scan.

use crate::domain::indicator::IndicatorSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    DeathCross,
    NoCross,
    NotApplicable,
}

impl Crossover {
    pub fn is_flagged(self) -> bool {
        self == Crossover::DeathCross
    }
}

/// Flag a death cross iff the short EMA was strictly above the long EMA
/// at the second-to-last date and is strictly below at the last date.
///
/// `min_bars` is the caller's history gate (long window + 1 in the
/// standard configuration); at least 2 defined points are always needed.
pub fn detect_death_cross(
    short: &IndicatorSeries,
    long: &IndicatorSeries,
    min_bars: usize,
) -> Crossover {
    let len = short.values.len();
    if len != long.values.len() || len < min_bars.max(2) {
        return Crossover::NotApplicable;
    }

    let pairs = [
        (short.simple_at(len - 2), long.simple_at(len - 2)),
        (short.simple_at(len - 1), long.simple_at(len - 1)),
    ];
    let [(s_prev, l_prev), (s_last, l_last)] = pairs;
    let (Some(s_prev), Some(l_prev), Some(s_last), Some(l_last)) =
        (s_prev, l_prev, s_last, l_last)
    else {
        return Crossover::NotApplicable;
    };

    if s_prev > l_prev && s_last < l_last {
        Crossover::DeathCross
    } else {
        Crossover::NoCross
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{calculate_ema, IndicatorPoint, IndicatorType, IndicatorValue};
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> IndicatorSeries {
        IndicatorSeries {
            indicator_type: IndicatorType::Ema(1),
            values: values
                .iter()
                .enumerate()
                .map(|(i, &v)| IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, i as u32 + 1).unwrap(),
                    valid: true,
                    value: IndicatorValue::Simple(v),
                })
                .collect(),
        }
    }

    fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                code: "588000".into(),
                date: NaiveDate::from_ymd_opt(2024, 1 + (i / 28) as u32, (i % 28 + 1) as u32)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn flags_cross_below_on_last_step() {
        let short = series(&[10.0, 10.5, 9.0]);
        let long = series(&[9.5, 9.8, 9.5]);
        assert_eq!(detect_death_cross(&short, &long, 2), Crossover::DeathCross);
    }

    #[test]
    fn no_cross_when_short_stays_above() {
        let short = series(&[10.0, 10.5, 11.0]);
        let long = series(&[9.5, 9.8, 10.0]);
        assert_eq!(detect_death_cross(&short, &long, 2), Crossover::NoCross);
    }

    #[test]
    fn no_cross_when_already_below() {
        let short = series(&[9.0, 8.5, 8.0]);
        let long = series(&[9.5, 9.8, 10.0]);
        assert_eq!(detect_death_cross(&short, &long, 2), Crossover::NoCross);
    }

    #[test]
    fn earlier_cross_not_reported() {
        // Crossed two steps ago, not on the last step.
        let short = series(&[10.0, 9.0, 8.5]);
        let long = series(&[9.5, 9.5, 9.5]);
        assert_eq!(detect_death_cross(&short, &long, 2), Crossover::NoCross);
    }

    #[test]
    fn touch_without_strict_inequality_is_no_cross() {
        let short = series(&[10.0, 9.5]);
        let long = series(&[9.5, 9.5]);
        assert_eq!(detect_death_cross(&short, &long, 2), Crossover::NoCross);
    }

    #[test]
    fn single_point_not_applicable() {
        let short = series(&[10.0]);
        let long = series(&[9.5]);
        assert_eq!(
            detect_death_cross(&short, &long, 2),
            Crossover::NotApplicable
        );
    }

    #[test]
    fn min_bars_gate() {
        let short = series(&[10.0, 9.0]);
        let long = series(&[9.5, 9.5]);
        assert_eq!(
            detect_death_cross(&short, &long, 27),
            Crossover::NotApplicable
        );
    }

    #[test]
    fn mismatched_lengths_not_applicable() {
        let short = series(&[10.0, 9.0, 8.0]);
        let long = series(&[9.5, 9.5]);
        assert_eq!(
            detect_death_cross(&short, &long, 2),
            Crossover::NotApplicable
        );
    }

    #[test]
    fn never_flags_on_continuously_rising_closes() {
        // Short EMA stays above long EMA for the whole ramp.
        let closes: Vec<f64> = (0..60).map(|i| 10.0 + i as f64 * 0.25).collect();
        let bars = make_bars(&closes);
        for end in 27..=60 {
            let short = calculate_ema(&bars[..end], 12);
            let long = calculate_ema(&bars[..end], 26);
            assert_eq!(detect_death_cross(&short, &long, 27), Crossover::NoCross);
        }
    }

    #[test]
    fn detects_cross_after_trend_reversal() {
        // Long rise then a hard sell-off: the short EMA must cross below
        // the long EMA at some step.
        let mut closes: Vec<f64> = (0..40).map(|i| 10.0 + i as f64 * 0.5).collect();
        closes.extend((0..25).map(|i| 30.0 - i as f64 * 1.2));
        let bars = make_bars(&closes);

        let crossed = (27..=closes.len()).any(|end| {
            let short = calculate_ema(&bars[..end], 12);
            let long = calculate_ema(&bars[..end], 26);
            detect_death_cross(&short, &long, 27) == Crossover::DeathCross
        });
        assert!(crossed);
    }
}
