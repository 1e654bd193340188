//! # Divination Figure Generator
//!
//! Turns a trailing window of candles into binary symbols, names them, and reads a
//! direction out of the named figures.
//!
//! ## Architectural Principles
//!
//! - **Pure functions of the window:** every operation reads only the candles it is
//!   handed and only the trailing part its method needs. There is no look-ahead and no
//!   hidden state.
//! - **Closed tables:** figure names are enums whose classification tables are built at
//!   compile time, so every bit pattern has exactly one name.
//! - **Faults are not opinions:** missing data and classification mismatches are errors;
//!   an unresolved meaning is `Polarity::Uncertain`.
//!
//! ## Public API
//!
//! - `generator`: symbol generation per `SymbolMethod`.
//! - `Figure`: the trait shared by `GeomanticFigure`, `Trigram`, `Bigram` and `Hexagram`.
//! - `geomancy`: shield chart derivation (`GeomanticChart`) and meaning resolution.
//! - `iching`: hexagram/trigram/bigram readings (`IChingReading`).
//! - `calendar` and `elements`: daily astro calendars and Ba Zi day pillars used as gates.

pub mod calendar;
pub mod elements;
pub mod error;
pub mod figure;
pub mod generator;
pub mod geomancy;
pub mod iching;
pub mod symbol;

pub use calendar::{AstroAction, DailyCalendar, astro_consensus};
pub use elements::{DayPillar, EarthlyBranch, Element, HeavenlyStem, bazi_polarity, element_score};
pub use error::DivinationError;
pub use figure::Figure;
pub use geomancy::{GeomanticChart, GeomanticDecision, GeomanticFigure};
pub use iching::{Bigram, Hexagram, IChingReading, Trigram};
pub use symbol::{Bit, Symbol};
