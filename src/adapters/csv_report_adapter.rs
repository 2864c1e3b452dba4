//! CSV report adapter: writes the per-mode result tables.
//!
//! Display rounding happens here and only here: 3 decimals for prices
//! and ATR, 2 for percentages, currency and indicator values, 1 for the
//! composite score. The domain records stay unrounded.

use crate::domain::error::EtfscanError;
use crate::domain::evaluation::{PositionRecord, RiskRecord, TrendRecord};
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>, EtfscanError> {
    csv::Writer::from_path(path).map_err(|e| EtfscanError::DataSource {
        reason: format!("failed to open {}: {}", path.display(), e),
    })
}

fn write_row<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    path: &Path,
    row: &[String],
) -> Result<(), EtfscanError> {
    wtr.write_record(row).map_err(|e| EtfscanError::DataSource {
        reason: format!("failed to write {}: {}", path.display(), e),
    })
}

fn finish<W: std::io::Write>(wtr: csv::Writer<W>, path: &Path) -> Result<(), EtfscanError> {
    wtr.into_inner()
        .map_err(|e| EtfscanError::DataSource {
            reason: format!("failed to flush {}: {}", path.display(), e),
        })
        .map(|_| ())
}

impl ReportPort for CsvReportAdapter {
    fn write_risk(&self, records: &[RiskRecord], path: &Path) -> Result<(), EtfscanError> {
        let mut wtr = open_writer(path)?;
        write_row(
            &mut wtr,
            path,
            &[
                "code".into(),
                "latest_price".into(),
                "rsi_divergence".into(),
                "obv_divergence".into(),
                "ema_death_cross".into(),
            ],
        )?;
        for r in records {
            write_row(
                &mut wtr,
                path,
                &[
                    r.code.clone(),
                    format!("{:.3}", r.latest_price),
                    r.rsi_divergence.to_string(),
                    r.obv_divergence.to_string(),
                    r.ema_death_cross.to_string(),
                ],
            )?;
        }
        finish(wtr, path)
    }

    fn write_trend(&self, records: &[TrendRecord], path: &Path) -> Result<(), EtfscanError> {
        let mut wtr = open_writer(path)?;
        write_row(
            &mut wtr,
            path,
            &[
                "code".into(),
                "adx".into(),
                "macd_bullish".into(),
                "rsi".into(),
                "score".into(),
            ],
        )?;
        for r in records {
            write_row(
                &mut wtr,
                path,
                &[
                    r.code.clone(),
                    format!("{:.2}", r.adx),
                    r.macd_bullish.to_string(),
                    format!("{:.2}", r.rsi),
                    format!("{:.1}", r.score),
                ],
            )?;
        }
        finish(wtr, path)
    }

    fn write_position(
        &self,
        records: &[PositionRecord],
        path: &Path,
    ) -> Result<(), EtfscanError> {
        let mut wtr = open_writer(path)?;
        write_row(
            &mut wtr,
            path,
            &[
                "code".into(),
                "latest_price".into(),
                "atr".into(),
                "quantity".into(),
                "stop_loss_pct".into(),
                "max_loss".into(),
            ],
        )?;
        for r in records {
            write_row(
                &mut wtr,
                path,
                &[
                    r.code.clone(),
                    format!("{:.3}", r.latest_price),
                    format!("{:.3}", r.atr),
                    r.quantity.to_string(),
                    format!("{:.2}", r.stop_loss_pct),
                    format!("{:.2}", r.max_loss),
                ],
            )?;
        }
        finish(wtr, path)
    }
}
