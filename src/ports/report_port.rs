//! Result persistence port trait.

use crate::domain::error::EtfscanError;
use crate::domain::evaluation::{PositionRecord, RiskRecord, TrendRecord};
use std::path::Path;

/// Port for writing one flat table of evaluation results. Each mode has
/// its own fixed column set.
pub trait ReportPort {
    fn write_risk(&self, records: &[RiskRecord], path: &Path) -> Result<(), EtfscanError>;

    fn write_trend(&self, records: &[TrendRecord], path: &Path) -> Result<(), EtfscanError>;

    fn write_position(&self, records: &[PositionRecord], path: &Path)
        -> Result<(), EtfscanError>;
}
