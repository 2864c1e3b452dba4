//! OHLCV bar and spot quote representations.

use chrono::NaiveDate;

/// One daily observation for one instrument. Provider data may violate
/// `high >= close >= low`; nothing here assumes it holds.
#[derive(Debug, Clone)]
pub struct OhlcvBar {
    pub code: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Current-day quote: latest price and cumulative volume.
#[derive(Debug, Clone, Copy)]
pub struct SpotQuote {
    pub price: f64,
    pub volume: f64,
}
