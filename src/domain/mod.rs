//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod params;
pub mod indicator;
pub mod signal;
pub mod evaluation;
pub mod error;
