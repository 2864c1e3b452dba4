//! Engine tunables: one immutable value threaded through every component.

use crate::domain::error::EtfscanError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_RSI_WINDOW: usize = 14;
pub const DEFAULT_EMA_SHORT: usize = 12;
pub const DEFAULT_EMA_LONG: usize = 26;
pub const DEFAULT_ADX_WINDOW: usize = 14;
pub const DEFAULT_ATR_WINDOW: usize = 14;
pub const DEFAULT_DIVERGENCE_WINDOW: usize = 5;
pub const DEFAULT_ATR_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_LOSS: f64 = 150.0;
pub const DEFAULT_LOT_SIZE: u64 = 100;

/// All named, overridable engine parameters. Never mutated after
/// construction, so evaluation stays pure and parallel-safe.
#[derive(Debug, Clone)]
pub struct EngineParams {
    pub rsi_window: usize,
    pub ema_short: usize,
    pub ema_long: usize,
    pub adx_window: usize,
    pub atr_window: usize,
    pub divergence_window: usize,
    pub atr_multiplier: f64,
    pub max_loss_per_instrument: f64,
    pub lot_size: u64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            rsi_window: DEFAULT_RSI_WINDOW,
            ema_short: DEFAULT_EMA_SHORT,
            ema_long: DEFAULT_EMA_LONG,
            adx_window: DEFAULT_ADX_WINDOW,
            atr_window: DEFAULT_ATR_WINDOW,
            divergence_window: DEFAULT_DIVERGENCE_WINDOW,
            atr_multiplier: DEFAULT_ATR_MULTIPLIER,
            max_loss_per_instrument: DEFAULT_MAX_LOSS,
            lot_size: DEFAULT_LOT_SIZE,
        }
    }
}

impl EngineParams {
    pub fn from_config(adapter: &dyn ConfigPort) -> Self {
        let d = Self::default();
        Self {
            rsi_window: get_window(adapter, "rsi_window", d.rsi_window),
            ema_short: get_window(adapter, "ema_short", d.ema_short),
            ema_long: get_window(adapter, "ema_long", d.ema_long),
            adx_window: get_window(adapter, "adx_window", d.adx_window),
            atr_window: get_window(adapter, "atr_window", d.atr_window),
            divergence_window: get_window(adapter, "divergence_window", d.divergence_window),
            atr_multiplier: adapter.get_double("position", "atr_multiplier", d.atr_multiplier),
            max_loss_per_instrument: adapter.get_double(
                "position",
                "max_loss_per_instrument",
                d.max_loss_per_instrument,
            ),
            lot_size: get_lot_size(adapter, d.lot_size),
        }
    }
}

fn get_window(adapter: &dyn ConfigPort, key: &str, default: usize) -> usize {
    let v = adapter.get_int("indicators", key, default as i64);
    if v < 0 { default } else { v as usize }
}

// A negative value must not wrap through the cast into a huge quantity.
fn get_lot_size(adapter: &dyn ConfigPort, default: u64) -> u64 {
    let v = adapter.get_int("position", "lot_size", default as i64);
    if v < 0 { default } else { v as u64 }
}

pub fn validate_params(params: &EngineParams) -> Result<(), EtfscanError> {
    let windows = [
        ("rsi_window", params.rsi_window),
        ("ema_short", params.ema_short),
        ("ema_long", params.ema_long),
        ("adx_window", params.adx_window),
        ("atr_window", params.atr_window),
        ("divergence_window", params.divergence_window),
    ];
    for (key, value) in windows {
        if value == 0 {
            return Err(EtfscanError::ConfigInvalid {
                section: "indicators".into(),
                key: key.into(),
                reason: "window must be at least 1".into(),
            });
        }
    }

    if params.ema_short >= params.ema_long {
        return Err(EtfscanError::ConfigInvalid {
            section: "indicators".into(),
            key: "ema_short".into(),
            reason: format!(
                "short window {} must be less than long window {}",
                params.ema_short, params.ema_long
            ),
        });
    }

    if !(params.atr_multiplier > 0.0) {
        return Err(EtfscanError::ConfigInvalid {
            section: "position".into(),
            key: "atr_multiplier".into(),
            reason: "must be positive".into(),
        });
    }
    if !(params.max_loss_per_instrument > 0.0) {
        return Err(EtfscanError::ConfigInvalid {
            section: "position".into(),
            key: "max_loss_per_instrument".into(),
            reason: "must be positive".into(),
        });
    }
    if params.lot_size == 0 {
        return Err(EtfscanError::ConfigInvalid {
            section: "position".into(),
            key: "lot_size".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(())
}
