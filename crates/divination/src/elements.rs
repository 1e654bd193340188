//! Ba Zi day pillars and their five-element balance.

use crate::calendar::first_selected_day;
use chrono::{DateTime, Days, NaiveDate, Utc};
use core_types::Polarity;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Contribution to the day score: metal, water and earth support, fire and wood weaken.
    pub fn weight(self) -> i64 {
        match self {
            Element::Metal | Element::Water | Element::Earth => 1,
            Element::Fire | Element::Wood => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    pub const ALL: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    /// Ordinal number, 1..=10.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn element(self) -> Element {
        match self {
            HeavenlyStem::Jia | HeavenlyStem::Yi => Element::Wood,
            HeavenlyStem::Bing | HeavenlyStem::Ding => Element::Fire,
            HeavenlyStem::Wu | HeavenlyStem::Ji => Element::Earth,
            HeavenlyStem::Geng | HeavenlyStem::Xin => Element::Metal,
            HeavenlyStem::Ren | HeavenlyStem::Gui => Element::Water,
        }
    }

    /// Odd-numbered stems are yang.
    pub fn is_yang(self) -> bool {
        self.number() % 2 == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    pub const ALL: [EarthlyBranch; 12] = [
        EarthlyBranch::Zi,
        EarthlyBranch::Chou,
        EarthlyBranch::Yin,
        EarthlyBranch::Mao,
        EarthlyBranch::Chen,
        EarthlyBranch::Si,
        EarthlyBranch::Wu,
        EarthlyBranch::Wei,
        EarthlyBranch::Shen,
        EarthlyBranch::You,
        EarthlyBranch::Xu,
        EarthlyBranch::Hai,
    ];

    /// Ordinal number, 1..=12.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn element(self) -> Element {
        match self {
            EarthlyBranch::Zi | EarthlyBranch::Hai => Element::Water,
            EarthlyBranch::Yin | EarthlyBranch::Mao => Element::Wood,
            EarthlyBranch::Si | EarthlyBranch::Wu => Element::Fire,
            EarthlyBranch::Shen | EarthlyBranch::You => Element::Metal,
            EarthlyBranch::Chou | EarthlyBranch::Chen | EarthlyBranch::Wei | EarthlyBranch::Xu => Element::Earth,
        }
    }

    pub fn is_yang(self) -> bool {
        self.number() % 2 == 1
    }
}

/// 1900-01-01 is a Jia-Xu day, the eleventh of the sixty-day cycle.
const ANCHOR_CYCLE_INDEX: i64 = 10;

/// The stem and branch naming a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayPillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl DayPillar {
    pub fn for_date(date: NaiveDate) -> Self {
        let anchor = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
        let offset = date.signed_duration_since(anchor).num_days();
        let index = (ANCHOR_CYCLE_INDEX + offset).rem_euclid(60) as usize;
        Self {
            stem: HeavenlyStem::ALL[index % 10],
            branch: EarthlyBranch::ALL[index % 12],
        }
    }

    /// Position in the sixty-day cycle, 1..=60 (Jia-Zi is 1).
    pub fn cycle_number(&self) -> u8 {
        (0..60u8)
            .find(|i| usize::from(*i) % 10 == self.stem as usize && usize::from(*i) % 12 == self.branch as usize)
            .map_or(0, |i| i + 1)
    }

    pub fn score(&self) -> i64 {
        self.stem.element().weight() + self.branch.element().weight()
    }
}

impl fmt::Display for DayPillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.stem, self.branch)
    }
}

/// Metal + Water + Earth - Fire - Wood over every stem and branch.
pub fn element_score(pillars: &[DayPillar]) -> i64 {
    pillars.iter().map(DayPillar::score).sum()
}

/// The `period` day pillars considered for a candle.
pub fn selected_pillars(candle_time: DateTime<Utc>, shift_hour: u32, period: usize) -> Vec<DayPillar> {
    let first = first_selected_day(candle_time, shift_hour);
    (0..period as u64)
        .filter_map(|offset| first.checked_add_days(Days::new(offset)))
        .map(DayPillar::for_date)
        .collect()
}

/// Five-element polarity of the days following a candle.
pub fn bazi_polarity(candle_time: DateTime<Utc>, shift_hour: u32, period: usize) -> Polarity {
    let pillars = selected_pillars(candle_time, shift_hour, period);
    let score = element_score(&pillars);
    tracing::trace!(%candle_time, score, "Ba Zi element score");
    Polarity::from_score(score)
}
