//! Day-indexed lookups that gate a reading by what the coming days hold.

use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A daily label supplied alongside the candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AstroAction {
    Buy,
    Sell,
    Neutral,
}

impl FromStr for AstroAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(AstroAction::Buy),
            "sell" => Ok(AstroAction::Sell),
            "neutral" | "" => Ok(AstroAction::Neutral),
            other => Err(format!("Unknown astro action '{}'", other)),
        }
    }
}

/// An ordered, date-keyed calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCalendar<T> {
    days: BTreeMap<NaiveDate, T>,
}

impl<T> DailyCalendar<T> {
    pub fn new() -> Self {
        Self { days: BTreeMap::new() }
    }

    pub fn insert(&mut self, date: NaiveDate, value: T) -> Option<T> {
        self.days.insert(date, value)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&T> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Entries relevant to a candle: those dated on or after the candle's day, skipping the
    /// first one once the candle hour reaches `shift_hour`, limited to `period` entries.
    pub fn select(&self, candle_time: DateTime<Utc>, shift_hour: u32, period: usize) -> Vec<&T> {
        let skip = usize::from(candle_time.hour() >= shift_hour);
        self.days
            .range(candle_time.date_naive()..)
            .skip(skip)
            .take(period)
            .map(|(_, value)| value)
            .collect()
    }
}

impl<T> Default for DailyCalendar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(NaiveDate, T)> for DailyCalendar<T> {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, T)>>(iter: I) -> Self {
        Self { days: iter.into_iter().collect() }
    }
}

/// First day considered for a candle: its own day, or the next one once the candle hour
/// reaches `shift_hour`.
pub fn first_selected_day(candle_time: DateTime<Utc>, shift_hour: u32) -> NaiveDate {
    let date = candle_time.date_naive();
    if candle_time.hour() >= shift_hour {
        date.checked_add_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    }
}

/// Buy or sell only when every selected day agrees. An empty selection is neutral.
pub fn astro_consensus(calendar: &DailyCalendar<AstroAction>, candle_time: DateTime<Utc>, shift_hour: u32, period: usize) -> AstroAction {
    let selected = calendar.select(candle_time, shift_hour, period);
    let action = match selected.first() {
        Some(first) if selected.iter().all(|action| *action == *first) => **first,
        _ => AstroAction::Neutral,
    };
    tracing::trace!(%candle_time, days = selected.len(), ?action, "Astro consensus");
    action
}
