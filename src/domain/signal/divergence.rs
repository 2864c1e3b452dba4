//! Bearish top-divergence detection: price makes its window high on the
//! most recent bar while the oscillator does not.

use crate::domain::indicator::IndicatorSeries;

/// Tri-state outcome: `NotApplicable` keeps the "insufficient data"
/// case distinct from a genuine no-signal reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    TopDivergence,
    NoDivergence,
    NotApplicable,
}

impl Divergence {
    /// Collapse to a flag; `NotApplicable` reads as no signal.
    pub fn is_flagged(self) -> bool {
        self == Divergence::TopDivergence
    }
}

/// Compare raw prices against an aligned oscillator series over the
/// trailing `window` dates.
///
/// `min_len` is the caller's required prior history (e.g. the RSI window
/// plus the trailing window); below `max(min_len, window)` points the
/// detector is not applicable. Within the window, "the maximum occurs at"
/// means the arg-max index with a last-occurrence tie-break, applied
/// identically to both series.
pub fn detect_top_divergence(
    prices: &[f64],
    oscillator: &IndicatorSeries,
    window: usize,
    min_len: usize,
) -> Divergence {
    if window == 0 || prices.len() != oscillator.values.len() {
        return Divergence::NotApplicable;
    }
    let len = prices.len();
    if len < min_len.max(window) {
        return Divergence::NotApplicable;
    }

    let start = len - window;
    let mut osc_tail = Vec::with_capacity(window);
    for i in start..len {
        match oscillator.simple_at(i) {
            Some(v) => osc_tail.push(v),
            // An unfilled oscillator point inside the window is not a zero.
            None => return Divergence::NotApplicable,
        }
    }
    let price_tail = &prices[start..];

    let price_peak = argmax_last(price_tail);
    let osc_peak = argmax_last(&osc_tail);

    if price_peak == window - 1 && osc_peak != window - 1 {
        Divergence::TopDivergence
    } else {
        Divergence::NoDivergence
    }
}

/// Arg-max with last-occurrence tie-break.
fn argmax_last(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v >= values[best] {
            best = i;
        }
    }
    best
}
