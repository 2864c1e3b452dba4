#![allow(dead_code)]

use chrono::NaiveDate;
use etfscan::domain::error::EtfscanError;
pub use etfscan::domain::ohlcv::{OhlcvBar, SpotQuote};
use etfscan::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub spot: HashMap<String, SpotQuote>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            spot: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_spot(mut self, code: &str, price: f64, volume: f64) -> Self {
        self.spot
            .insert(code.to_string(), SpotQuote { price, volume });
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_history(&self, code: &str) -> Result<Vec<OhlcvBar>, EtfscanError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(EtfscanError::DataSource {
                reason: reason.clone(),
            });
        }
        self.data
            .get(code)
            .cloned()
            .ok_or_else(|| EtfscanError::NoData {
                code: code.to_string(),
            })
    }

    fn fetch_spot(&self, code: &str) -> Result<Option<SpotQuote>, EtfscanError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(EtfscanError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.spot.get(code).copied())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(code: &str, date_str: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        code: code.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close - 0.05,
        high: close + 0.1,
        low: close - 0.1,
        close,
        volume: 1000.0,
    }
}

/// Linear close ramp starting at `start_price`, stepping 0.25 per bar,
/// constant volume. Strictly rising closes keep RSI pinned at 100 and the
/// MACD fast line above its signal.
pub fn ramp_bars(code: &str, start_date: &str, count: usize, start_price: f64) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let close = start_price + i as f64 * 0.25;
            OhlcvBar {
                code: code.to_string(),
                date: start + chrono::Duration::days(i as i64),
                open: close - 0.05,
                high: close + 0.1,
                low: close - 0.1,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}
