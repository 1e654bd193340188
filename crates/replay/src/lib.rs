//! # Geomancer Replay
//!
//! Drives a single strategy over an ordered candle sequence and reports what it decided.
//! There is no order execution here: a replay answers "which signals would this reading
//! have produced, and where did it fail to read the market".

use crate::error::ReplayError;
use chrono::{DateTime, Utc};
use core_types::{Kline, OrderSide, Signal};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use strategies::Strategy;
use tracing::{info, warn};
use uuid::Uuid;

pub mod data;
pub mod error;

pub use data::{load_klines_csv, parse_interval};

/// A candle the strategy could not evaluate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFault {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// The outcome of one replay run.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub run_id: Uuid,
    pub symbol: String,
    pub candles: usize,
    pub signals: Vec<Signal>,
    pub faults: Vec<StepFault>,
    pub first_candle: DateTime<Utc>,
    pub last_candle: DateTime<Utc>,
}

impl ReplayReport {
    pub fn buys(&self) -> usize {
        self.signals.iter().filter(|s| s.side == OrderSide::Buy).count()
    }

    pub fn sells(&self) -> usize {
        self.signals.iter().filter(|s| s.side == OrderSide::Sell).count()
    }
}

/// The replay engine.
pub struct Replayer {
    run_id: Uuid,
    symbol: String,
    strategy: Box<dyn Strategy>,
    progress: ProgressBar,
}

impl Replayer {
    /// Constructs a replayer with a hidden progress bar.
    pub fn new(symbol: String, strategy: Box<dyn Strategy>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            symbol,
            strategy,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports progress on `progress` (e.g. a bar registered with a `MultiProgress`).
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Feeds every candle to the strategy in order.
    ///
    /// A strategy error on one candle is recorded as a `StepFault` and the replay moves on
    /// to the next candle.
    pub fn run(&mut self, klines: &[Kline]) -> Result<ReplayReport, ReplayError> {
        let (Some(first), Some(last)) = (klines.first(), klines.last()) else {
            return Err(ReplayError::DataUnavailable);
        };

        self.progress.set_length(klines.len() as u64);
        self.progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                .progress_chars("=>-"),
        );
        self.progress.set_message(self.symbol.clone());

        let mut signals = Vec::new();
        let mut faults = Vec::new();

        for (index, kline) in klines.iter().enumerate() {
            match self.strategy.evaluate(kline) {
                Ok(Some(signal)) => signals.push(signal),
                Ok(None) => {}
                Err(error) => {
                    warn!(run_id = %self.run_id, index, timestamp = %kline.open_time, %error, "Step skipped");
                    faults.push(StepFault {
                        index,
                        timestamp: kline.open_time,
                        message: error.to_string(),
                    });
                }
            }
            self.progress.inc(1);
        }

        self.progress.finish_with_message(format!("{} complete", self.symbol));

        let report = ReplayReport {
            run_id: self.run_id,
            symbol: self.symbol.clone(),
            candles: klines.len(),
            signals,
            faults,
            first_candle: first.open_time,
            last_candle: last.open_time,
        };
        info!(
            run_id = %report.run_id,
            symbol = %report.symbol,
            candles = report.candles,
            buys = report.buys(),
            sells = report.sells(),
            faults = report.faults.len(),
            "Replay finished"
        );
        Ok(report)
    }
}
