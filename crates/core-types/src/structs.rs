use crate::enums::OrderSide;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single candlestick bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: DateTime<Utc>,
    pub interval: String,
}

/// A directional decision emitted by a strategy.
///
/// Sizing, order type and stop placement are left to whoever consumes the signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub side: OrderSide,
    pub confidence: Decimal,
}

impl Signal {
    pub fn new(symbol: &str, side: OrderSide, timestamp: DateTime<Utc>, confidence: Decimal) -> Self {
        Self {
            signal_id: Uuid::new_v4(),
            timestamp,
            symbol: symbol.to_string(),
            side,
            confidence,
        }
    }
}
