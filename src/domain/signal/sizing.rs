//! ATR-based position sizing against a fixed per-instrument loss budget.

use crate::domain::indicator::calculate_atr;
use crate::domain::params::EngineParams;
use crate::domain::series::SeriesStore;

/// A sizing recommendation. All values are unrounded; display rounding
/// belongs to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionPlan {
    pub latest_price: f64,
    pub atr: f64,
    /// Whole shares, always a positive multiple of the lot size.
    pub quantity: u64,
    pub stop_loss_pct: f64,
    pub max_loss: f64,
}

/// Size a position from the latest ATR and close.
///
/// risk_per_share = multiplier * ATR; the quantity is the loss budget
/// floor-divided by the per-share risk, rounded down to a whole lot,
/// with a floor of one lot. With the one-lot floor the reported max
/// loss can exceed the budget.
///
/// No recommendation when the ATR is undefined or non-positive, or the
/// latest close is non-positive or non-finite.
pub fn plan_position(store: &SeriesStore, params: &EngineParams) -> Option<PositionPlan> {
    let atr = calculate_atr(store.bars(), params.atr_window).latest_simple()?;
    let close = store.latest_close()?;
    if !(close > 0.0) || !close.is_finite() {
        return None;
    }

    let risk_per_share = params.atr_multiplier * atr;
    if !(risk_per_share > 0.0) || !risk_per_share.is_finite() {
        return None;
    }

    let stop_loss_pct = risk_per_share / close * 100.0;
    let raw_qty = (params.max_loss_per_instrument / risk_per_share).floor() as u64;
    let quantity = (raw_qty / params.lot_size * params.lot_size).max(params.lot_size);
    let max_loss = risk_per_share * quantity as f64;

    Some(PositionPlan {
        latest_price: close,
        atr,
        quantity,
        stop_loss_pct,
        max_loss,
    })
}
