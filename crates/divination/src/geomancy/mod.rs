//! Geomantic shield charts: sixteen figures cast from the newest candles and read as a
//! money question.

pub mod chart;
pub mod figure;
pub mod meaning;

pub use chart::{CHART_LINES, GeomanticChart, Position, Tetragram};
pub use figure::GeomanticFigure;
pub use meaning::{DecisionSource, GeomanticDecision, house_meaning, resolve, witness_judgement};

use crate::error::DivinationError;
use core_types::{Kline, SymbolMethod};

/// Casts a chart over the trailing window and resolves it.
pub fn divine(method: SymbolMethod, klines: &[Kline]) -> Result<(GeomanticChart, GeomanticDecision), DivinationError> {
    let chart = GeomanticChart::cast(method, klines)?;
    let decision = resolve(&chart)?;
    Ok((chart, decision))
}
