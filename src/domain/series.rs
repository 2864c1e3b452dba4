//! SeriesStore: the ordered, date-indexed bar table one evaluation pass reads.

use crate::domain::ohlcv::{OhlcvBar, SpotQuote};
use chrono::NaiveDate;

/// Ascending-by-date, duplicate-free bar sequence for one instrument.
///
/// Built once per evaluation pass and treated as immutable afterwards.
/// [`SeriesStore::apply_spot`] is part of the build stage: it splices the
/// current-day quote in before any indicator runs.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    code: String,
    bars: Vec<OhlcvBar>,
}

impl SeriesStore {
    /// Sorts by date and deduplicates. On a duplicate date the later
    /// input row wins, mirroring an indexed-table overwrite.
    pub fn new(code: String, mut bars: Vec<OhlcvBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            code,
            bars: deduped,
        }
    }

    /// Append the current-day quote as a synthetic bar (open/high/low/close
    /// all at the spot price). Replaces the existing bar if `today` is
    /// already the latest date.
    pub fn apply_spot(&mut self, quote: SpotQuote, today: NaiveDate) {
        let bar = OhlcvBar {
            code: self.code.clone(),
            date: today,
            open: quote.price,
            high: quote.price,
            low: quote.price,
            close: quote.price,
            volume: quote.volume,
        };
        match self.bars.iter().position(|b| b.date == today) {
            Some(i) => self.bars[i] = bar,
            None => {
                self.bars.push(bar);
                self.bars.sort_by_key(|b| b.date);
            }
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn latest(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(date: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            code: "510300".into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn new_sorts_by_date() {
        let store = SeriesStore::new(
            "510300".into(),
            vec![
                make_bar("2024-01-03", 102.0),
                make_bar("2024-01-01", 100.0),
                make_bar("2024-01-02", 101.0),
            ],
        );
        let dates: Vec<NaiveDate> = store.bars().iter().map(|b| b.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.latest_close(), Some(102.0));
    }

    #[test]
    fn new_dedupes_last_wins() {
        let store = SeriesStore::new(
            "510300".into(),
            vec![
                make_bar("2024-01-01", 100.0),
                make_bar("2024-01-02", 101.0),
                make_bar("2024-01-02", 999.0),
            ],
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest_close(), Some(999.0));
    }

    #[test]
    fn apply_spot_appends_new_date() {
        let mut store = SeriesStore::new(
            "510300".into(),
            vec![make_bar("2024-01-01", 100.0), make_bar("2024-01-02", 101.0)],
        );
        store.apply_spot(
            SpotQuote {
                price: 103.5,
                volume: 2000.0,
            },
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        );
        assert_eq!(store.len(), 3);
        let latest = store.latest().unwrap();
        assert_eq!(latest.close, 103.5);
        assert_eq!(latest.high, 103.5);
        assert_eq!(latest.low, 103.5);
        assert_eq!(latest.volume, 2000.0);
    }

    #[test]
    fn apply_spot_replaces_existing_date() {
        let mut store = SeriesStore::new(
            "510300".into(),
            vec![make_bar("2024-01-01", 100.0), make_bar("2024-01-02", 101.0)],
        );
        store.apply_spot(
            SpotQuote {
                price: 102.0,
                volume: 500.0,
            },
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest_close(), Some(102.0));
    }

    #[test]
    fn empty_store() {
        let store = SeriesStore::new("510300".into(), vec![]);
        assert!(store.is_empty());
        assert_eq!(store.latest_close(), None);
    }
}
