//! EvaluationRunner: per-instrument fetch → indicators → signals → record.
//!
//! Per-code failure is never fatal to the batch; a code that cannot be
//! evaluated is skipped with a stderr warning. Only a total absence of
//! usable results is surfaced as an error.

use crate::domain::error::EtfscanError;
use crate::domain::indicator::{calculate_ema, calculate_obv, calculate_rsi};
use crate::domain::params::EngineParams;
use crate::domain::series::SeriesStore;
use crate::domain::signal::{
    detect_death_cross, detect_top_divergence, evaluate_trend, plan_position, MIN_TREND_BARS,
};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// OBV needs no warmup, so its divergence gate is a bare history
/// minimum rather than a window-derived one.
pub const MIN_OBV_DIVERGENCE_BARS: usize = 10;

/// Risk-monitor mode output: warning flags on the latest bar.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRecord {
    pub code: String,
    pub latest_price: f64,
    pub rsi_divergence: bool,
    pub obv_divergence: bool,
    pub ema_death_cross: bool,
}

/// Trend-evaluation mode output, ranked by composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRecord {
    pub code: String,
    pub adx: f64,
    pub macd_bullish: bool,
    pub rsi: f64,
    pub score: f64,
}

/// Position-sizing mode output.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub code: String,
    pub latest_price: f64,
    pub atr: f64,
    pub quantity: u64,
    pub stop_loss_pct: f64,
    pub max_loss: f64,
}

/// Evaluate risk-divergence and death-cross flags for each code.
///
/// This mode requires both history and a current-day quote; the quote is
/// spliced into the store (keyed to `today`) before any indicator runs.
/// Flags that are not applicable on the available history read as false,
/// matching a monitor that stays quiet rather than alarming on thin data.
pub fn run_risk_monitor(
    port: &dyn DataPort,
    codes: &[String],
    params: &EngineParams,
    today: NaiveDate,
) -> Result<Vec<RiskRecord>, EtfscanError> {
    let mut results = Vec::with_capacity(codes.len());

    for code in codes {
        let Some(mut store) = build_store(port, code) else {
            continue;
        };

        let quote = match port.fetch_spot(code) {
            Ok(Some(q)) => q,
            Ok(None) => {
                eprintln!("warning: skipping {} (no spot quote)", code);
                continue;
            }
            Err(e) => {
                eprintln!("warning: skipping {} ({})", code, e);
                continue;
            }
        };
        store.apply_spot(quote, today);

        let bars = store.bars();
        let closes = store.closes();
        let w = params.divergence_window;

        let rsi = calculate_rsi(bars, params.rsi_window);
        let rsi_divergence = detect_top_divergence(&closes, &rsi, w, params.rsi_window + w);

        let obv = calculate_obv(bars);
        let obv_divergence = detect_top_divergence(&closes, &obv, w, MIN_OBV_DIVERGENCE_BARS);

        let ema_short = calculate_ema(bars, params.ema_short);
        let ema_long = calculate_ema(bars, params.ema_long);
        let death_cross = detect_death_cross(&ema_short, &ema_long, params.ema_long + 1);

        let Some(latest_price) = store.latest_close() else {
            continue;
        };

        results.push(RiskRecord {
            code: code.clone(),
            latest_price,
            rsi_divergence: rsi_divergence.is_flagged(),
            obv_divergence: obv_divergence.is_flagged(),
            ema_death_cross: death_cross.is_flagged(),
        });
    }

    if results.is_empty() {
        return Err(EtfscanError::NoResults);
    }
    Ok(results)
}

/// Score each code's trend strength; results sorted descending by score
/// (stable, so ties keep input order).
pub fn run_trend_evaluation(
    port: &dyn DataPort,
    codes: &[String],
    params: &EngineParams,
) -> Result<Vec<TrendRecord>, EtfscanError> {
    let mut results = Vec::with_capacity(codes.len());

    for code in codes {
        let Some(store) = build_store(port, code) else {
            continue;
        };

        if store.len() < MIN_TREND_BARS {
            let err = EtfscanError::InsufficientHistory {
                code: code.clone(),
                bars: store.len(),
                minimum: MIN_TREND_BARS,
            };
            eprintln!("warning: {err}; skipping");
            continue;
        }

        let Some(assessment) = evaluate_trend(&store, params) else {
            eprintln!("warning: skipping {} (indicators undefined)", code);
            continue;
        };

        results.push(TrendRecord {
            code: code.clone(),
            adx: assessment.adx,
            macd_bullish: assessment.macd_bullish,
            rsi: assessment.rsi,
            score: assessment.score,
        });
    }

    if results.is_empty() {
        return Err(EtfscanError::NoResults);
    }
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(results)
}

/// Produce an ATR-based sizing recommendation per code.
pub fn run_position_sizing(
    port: &dyn DataPort,
    codes: &[String],
    params: &EngineParams,
) -> Result<Vec<PositionRecord>, EtfscanError> {
    let mut results = Vec::with_capacity(codes.len());

    for code in codes {
        let Some(store) = build_store(port, code) else {
            continue;
        };

        if store.len() < params.atr_window {
            let err = EtfscanError::InsufficientHistory {
                code: code.clone(),
                bars: store.len(),
                minimum: params.atr_window,
            };
            eprintln!("warning: {err}; skipping");
            continue;
        }

        let Some(plan) = plan_position(&store, params) else {
            eprintln!("warning: skipping {} (no sizing recommendation)", code);
            continue;
        };

        results.push(PositionRecord {
            code: code.clone(),
            latest_price: plan.latest_price,
            atr: plan.atr,
            quantity: plan.quantity,
            stop_loss_pct: plan.stop_loss_pct,
            max_loss: plan.max_loss,
        });
    }

    if results.is_empty() {
        return Err(EtfscanError::NoResults);
    }
    Ok(results)
}

fn build_store(port: &dyn DataPort, code: &str) -> Option<SeriesStore> {
    let bars = match port.fetch_history(code) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("warning: skipping {} ({})", code, e);
            return None;
        }
    };
    if bars.is_empty() {
        eprintln!("warning: skipping {} (no history)", code);
        return None;
    }
    Some(SeriesStore::new(code.to_string(), bars))
}
