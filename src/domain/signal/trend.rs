//! Composite trend-strength scoring from ADX, MACD regime and RSI level.

use crate::domain::indicator::macd::{latest_macd, DEFAULT_SIGNAL};
use crate::domain::indicator::{calculate_adx, calculate_macd, calculate_rsi};
use crate::domain::params::EngineParams;
use crate::domain::series::SeriesStore;

/// Minimum history for a stable weighted score; below this the scorer
/// reports nothing at all rather than a partial composite.
pub const MIN_TREND_BARS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAssessment {
    pub adx: f64,
    pub macd_bullish: bool,
    pub rsi: f64,
    pub score: f64,
}

/// Score the latest bar of a store, or `None` when fewer than
/// [`MIN_TREND_BARS`] bars exist or any required indicator is undefined.
pub fn evaluate_trend(store: &SeriesStore, params: &EngineParams) -> Option<TrendAssessment> {
    if store.len() < MIN_TREND_BARS {
        return None;
    }
    let bars = store.bars();

    let adx = calculate_adx(bars, params.adx_window).latest_simple()?;
    let (dif, dea) = latest_macd(&calculate_macd(
        bars,
        params.ema_short,
        params.ema_long,
        DEFAULT_SIGNAL,
    ))?;
    let rsi = calculate_rsi(bars, params.rsi_window).latest_simple()?;

    let macd_bullish = dif > 0.0 && dea > 0.0;
    let score = 0.4 * adx_score(adx) + 0.3 * macd_score(macd_bullish) + 0.3 * rsi_score(rsi);

    Some(TrendAssessment {
        adx,
        macd_bullish,
        rsi,
        score,
    })
}

/// ADX capped at 50, rescaled to [0, 100].
pub fn adx_score(adx: f64) -> f64 {
    adx.min(50.0) / 50.0 * 100.0
}

/// All-or-nothing momentum regime: both MACD lines strictly positive.
pub fn macd_score(bullish: bool) -> f64 {
    if bullish { 100.0 } else { 0.0 }
}

/// RSI above 50 rescaled so 80 saturates; clamped to [0, 100].
pub fn rsi_score(rsi: f64) -> f64 {
    ((rsi - 50.0) / 30.0 * 100.0).clamp(0.0, 100.0)
}
