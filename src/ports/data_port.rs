//! Market-data access port trait.

use crate::domain::error::EtfscanError;
use crate::domain::ohlcv::{OhlcvBar, SpotQuote};

pub trait DataPort {
    /// Full daily history for one instrument, any order, any length.
    fn fetch_history(&self, code: &str) -> Result<Vec<OhlcvBar>, EtfscanError>;

    /// Current-day quote, or `Ok(None)` when the lookup misses.
    fn fetch_spot(&self, code: &str) -> Result<Option<SpotQuote>, EtfscanError>;
}
