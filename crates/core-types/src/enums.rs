use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// The final output of every decision function handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl Direction {
    /// The order side a host would open for this direction, if any.
    pub fn side(&self) -> Option<OrderSide> {
        match self {
            Direction::Long => Some(OrderSide::Buy),
            Direction::Short => Some(OrderSide::Sell),
            Direction::Neutral => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Long => "long",
            Direction::Short => "short",
            Direction::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// A signed meaning attached to a figure: bearish (-1), uncertain (0) or bullish (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Bearish,
    Uncertain,
    Bullish,
}

impl Polarity {
    /// Maps the raw table encoding onto a polarity. Anything other than -1/1 is uncertain.
    pub const fn from_i8(value: i8) -> Self {
        match value {
            1 => Polarity::Bullish,
            -1 => Polarity::Bearish,
            _ => Polarity::Uncertain,
        }
    }

    pub const fn value(&self) -> i8 {
        match self {
            Polarity::Bearish => -1,
            Polarity::Uncertain => 0,
            Polarity::Bullish => 1,
        }
    }

    pub fn is_decided(&self) -> bool {
        *self != Polarity::Uncertain
    }

    pub fn direction(&self) -> Direction {
        match self {
            Polarity::Bullish => Direction::Long,
            Polarity::Bearish => Direction::Short,
            Polarity::Uncertain => Direction::Neutral,
        }
    }

    /// Polarity of a signed score: positive is bullish, negative bearish.
    pub fn from_score(score: i64) -> Self {
        match score.signum() {
            1 => Polarity::Bullish,
            -1 => Polarity::Bearish,
            _ => Polarity::Uncertain,
        }
    }
}

/// How the bits of a symbol are derived from candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolMethod {
    /// Candle colour: a falling (or flat-with-range) candle is even.
    Color,
    /// Parity of the digit sum of the close.
    Price,
    /// Parity of the digit sum of the percentage close-to-close change.
    Returns,
    /// Parity of the digit sum of the scaled log close-to-close change.
    LogReturns,
}

impl SymbolMethod {
    /// Decodes the geomancy `symbol_method` hyperparameter (0 = colour, 1 = price).
    pub fn from_geomancy_code(code: i64) -> Result<Self, CoreError> {
        match code {
            0 => Ok(SymbolMethod::Color),
            1 => Ok(SymbolMethod::Price),
            other => Err(CoreError::InvalidInput(
                "symbol_method".to_string(),
                format!("geomancy accepts 0 or 1, got {}", other),
            )),
        }
    }

    /// Decodes the I-Ching `symbol_method` hyperparameter
    /// (0 = colour, 1 = returns, 2 = log returns, 3 = price).
    pub fn from_iching_code(code: i64) -> Result<Self, CoreError> {
        match code {
            0 => Ok(SymbolMethod::Color),
            1 => Ok(SymbolMethod::Returns),
            2 => Ok(SymbolMethod::LogReturns),
            3 => Ok(SymbolMethod::Price),
            other => Err(CoreError::InvalidInput(
                "symbol_method".to_string(),
                format!("iching accepts 0 to 3, got {}", other),
            )),
        }
    }

    /// Number of candles needed to produce `bits` bits with this method.
    pub fn klines_for(&self, bits: usize) -> usize {
        match self {
            SymbolMethod::Color | SymbolMethod::Price => bits,
            SymbolMethod::Returns | SymbolMethod::LogReturns => bits + 1,
        }
    }
}

impl FromStr for SymbolMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(SymbolMethod::Color),
            "price" => Ok(SymbolMethod::Price),
            "returns" => Ok(SymbolMethod::Returns),
            "log-returns" | "log_returns" => Ok(SymbolMethod::LogReturns),
            _ => Err(CoreError::InvalidInput("symbol_method".to_string(), s.to_string())),
        }
    }
}

/// Identifies which strategy the factory should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyId {
    Geomancy,
    IChing,
    BaZi,
    #[serde(rename = "astro-ma")]
    AstroMa,
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyId::Geomancy => "geomancy",
            StrategyId::IChing => "iching",
            StrategyId::BaZi => "bazi",
            StrategyId::AstroMa => "astro-ma",
        };
        f.write_str(s)
    }
}

impl FromStr for StrategyId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geomancy" => Ok(StrategyId::Geomancy),
            "iching" | "i-ching" => Ok(StrategyId::IChing),
            "bazi" | "ba-zi" => Ok(StrategyId::BaZi),
            "astro-ma" | "astroma" | "astro_ma" => Ok(StrategyId::AstroMa),
            _ => Err(CoreError::InvalidInput("strategy".to_string(), s.to_string())),
        }
    }
}
