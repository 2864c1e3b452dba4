//! Signal detectors and scoring built on top of the indicator library.

pub mod divergence;
pub mod crossover;
pub mod trend;
pub mod sizing;

pub use crossover::{detect_death_cross, Crossover};
pub use divergence::{detect_top_divergence, Divergence};
pub use sizing::{plan_position, PositionPlan};
pub use trend::{evaluate_trend, TrendAssessment, MIN_TREND_BARS};
