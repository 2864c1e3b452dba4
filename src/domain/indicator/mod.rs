//! Technical indicator implementations.
//!
//! Types for representing indicator values and series:
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorValue`: enum for the output shapes this engine emits
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a time series of indicator values aligned to the
//!   bar dates it was computed from
//!
//! A point with `valid == false` marks an unfilled lookback window; its
//! numeric payload is a placeholder and must never be read as a value.

pub mod rsi;
pub mod ema;
pub mod macd;
pub mod adx;
pub mod obv;
pub mod atr;

pub use adx::calculate_adx;
pub use atr::calculate_atr;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use obv::calculate_obv;
pub use rsi::calculate_rsi;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd { dif: f64, dea: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Ema(usize),
    Macd {
        short: usize,
        long: usize,
        signal: usize,
    },
    Adx(usize),
    Obv,
    Atr(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// The most recent point, if it is valid.
    pub fn latest_valid(&self) -> Option<&IndicatorPoint> {
        self.values.last().filter(|p| p.valid)
    }

    /// The most recent simple value, if valid and finite.
    pub fn latest_simple(&self) -> Option<f64> {
        match self.latest_valid()?.value {
            IndicatorValue::Simple(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// Simple value at `index`, if valid and finite.
    pub fn simple_at(&self, index: usize) -> Option<f64> {
        let point = self.values.get(index)?;
        if !point.valid {
            return None;
        }
        match point.value {
            IndicatorValue::Simple(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }
}
