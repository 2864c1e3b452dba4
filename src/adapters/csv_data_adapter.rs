//! CSV file data adapter: per-code history files plus an optional spot
//! quote table.
//!
//! History: `<dir>/<code>.csv` with columns date,open,high,low,close,volume.
//! Spot: `<dir>/spot.csv` with columns code,price,volume; a missing file
//! means the provider has no real-time feed, a missing row means the
//! lookup missed for that code.

use crate::domain::error::EtfscanError;
use crate::domain::ohlcv::{OhlcvBar, SpotQuote};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn history_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }

    fn spot_path(&self) -> PathBuf {
        self.base_path.join("spot.csv")
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, EtfscanError> {
    record.get(index).ok_or_else(|| EtfscanError::DataSource {
        reason: format!("missing {} column", name),
    })
}

fn parse_f64(raw: &str, name: &str) -> Result<f64, EtfscanError> {
    raw.trim().parse().map_err(|e| EtfscanError::DataSource {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl DataPort for CsvDataAdapter {
    fn fetch_history(&self, code: &str) -> Result<Vec<OhlcvBar>, EtfscanError> {
        let path = self.history_path(code);
        let content = fs::read_to_string(&path).map_err(|_| EtfscanError::NoData {
            code: code.to_string(),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| EtfscanError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                EtfscanError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(OhlcvBar {
                code: code.to_string(),
                date,
                open: parse_f64(field(&record, 1, "open")?, "open")?,
                high: parse_f64(field(&record, 2, "high")?, "high")?,
                low: parse_f64(field(&record, 3, "low")?, "low")?,
                close: parse_f64(field(&record, 4, "close")?, "close")?,
                volume: parse_f64(field(&record, 5, "volume")?, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn fetch_spot(&self, code: &str) -> Result<Option<SpotQuote>, EtfscanError> {
        let path = self.spot_path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Ok(None),
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        for result in rdr.records() {
            let record = result.map_err(|e| EtfscanError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            if field(&record, 0, "code")?.trim() != code {
                continue;
            }
            return Ok(Some(SpotQuote {
                price: parse_f64(field(&record, 1, "price")?, "price")?,
                volume: parse_f64(field(&record, 2, "volume")?, "volume")?,
            }));
        }

        Ok(None)
    }
}
