//! House meanings and the witness/judge table for money questions.
//!
//! Both tables are kept exactly as catalogued, including combinations whose polarity
//! disagrees with the figures' natures.

use crate::error::DivinationError;
use crate::figure::Figure;
use crate::geomancy::chart::GeomanticChart;
use crate::geomancy::figure::GeomanticFigure;
use core_types::{Direction, Polarity};
use serde::Serialize;

/// Number of houses covered by the meaning table (twelve houses plus the querent's outcome).
pub const HOUSES: u8 = 13;

/// The house questions about money are read in.
pub const MONEY_HOUSE: u8 = 2;

const fn house_row(figure: GeomanticFigure) -> [i8; HOUSES as usize] {
    use GeomanticFigure::*;
    match figure {
        Via => [-1, -1, 0, 1, 1, 1, -1, 1, -1, 0, 1, 1, 1],
        CaudaDraconis => [0, -1, -1, -1, 1, -1, 1, -1, -1, -1, -1, -1, 1],
        Puer => [-1, 0, 1, 1, -1, 1, 0, -1, -1, -1, -1, 0, 1],
        Puella => [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1],
        CaputDraconis => [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, -1],
        FortunaMinor => [1, 1, 1, 1, -1, 1, 0, -1, -1, 1, 1, 1, 1],
        Amissio => [0, -1, -1, -1, -1, -1, -1, 0, 1, -1, -1, -1, -1],
        Carcer => [-1, -1, 0, -1, -1, -1, -1, -1, -1, -1, -1, -1, 1],
        Conjunctio => [0, 0, 1, 1, 1, 0, 1, 1, -1, 1, 0, 1, 0],
        Acquisitio => [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, -1],
        FortunaMajor => [1; 13],
        Laetitia => [1, 1, -1, -1, 1, 1, -1, 0, -1, 1, 1, 1, -1],
        Rubeus => [0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
        Albus => [1; 13],
        Tristitia => [-1, 0, 0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
        Populus => [0, 1, 1, 1, 1, 1, 1, 1, -1, 0, 1, 1, -1],
    }
}

/// Polarity of `figure` standing in `house` (1-based). Houses outside 1..=13 are uncertain.
pub fn house_meaning(figure: GeomanticFigure, house: u8) -> Polarity {
    if !(1..=HOUSES).contains(&house) {
        return Polarity::Uncertain;
    }
    Polarity::from_i8(house_row(figure)[usize::from(house - 1)])
}

/// (second witness, first witness, judge, polarity), grouped by the second witness.
#[rustfmt::skip]
const WITNESS_JUDGEMENTS: [(GeomanticFigure, GeomanticFigure, GeomanticFigure, Polarity); 128] = {
    use GeomanticFigure::*;
    use Polarity::*;
    [
        // Via
        (Via, Populus, Via, Bearish),
        (Via, Via, Populus, Bearish),
        (Via, FortunaMajor, FortunaMinor, Uncertain),
        (Via, FortunaMinor, FortunaMajor, Uncertain),
        (Via, Conjunctio, Carcer, Uncertain),
        (Via, Carcer, Conjunctio, Uncertain),
        (Via, Acquisitio, Amissio, Uncertain),
        (Via, Amissio, Acquisitio, Uncertain),
        // CaudaDraconis
        (CaudaDraconis, CaputDraconis, Carcer, Bullish),
        (CaudaDraconis, Puer, FortunaMajor, Bearish),
        (CaudaDraconis, CaudaDraconis, Populus, Bearish),
        (CaudaDraconis, Puella, Acquisitio, Bullish),
        (CaudaDraconis, Rubeus, Amissio, Uncertain),
        (CaudaDraconis, Albus, FortunaMajor, Uncertain),
        (CaudaDraconis, Laetitia, Conjunctio, Bullish),
        (CaudaDraconis, Tristitia, Via, Bearish),
        // Puer
        (Puer, Puella, Conjunctio, Bullish),
        (Puer, Albus, Via, Uncertain),
        (Puer, Puer, Populus, Bearish),
        (Puer, Rubeus, Carcer, Bearish),
        (Puer, CaputDraconis, Amissio, Uncertain),
        (Puer, CaudaDraconis, FortunaMajor, Bearish),
        (Puer, Tristitia, Acquisitio, Uncertain),
        (Puer, Laetitia, FortunaMinor, Bearish),
        // Puella
        (Puella, Puer, Conjunctio, Uncertain),
        (Puella, Laetitia, FortunaMajor, Bullish),
        (Puella, Puella, Populus, Bullish),
        (Puella, Albus, Carcer, Bullish),
        (Puella, Rubeus, Via, Uncertain),
        (Puella, Tristitia, Amissio, Uncertain),
        (Puella, CaputDraconis, FortunaMinor, Bullish),
        (Puella, CaudaDraconis, Acquisitio, Bearish),
        // CaputDraconis
        (CaputDraconis, CaudaDraconis, Carcer, Bearish),
        (CaputDraconis, Albus, Acquisitio, Bullish),
        (CaputDraconis, CaputDraconis, Populus, Bullish),
        (CaputDraconis, Tristitia, Conjunctio, Uncertain),
        (CaputDraconis, Rubeus, FortunaMajor, Uncertain),
        (CaputDraconis, Laetitia, Via, Bullish),
        (CaputDraconis, Puer, Amissio, Bearish),
        (CaputDraconis, Puella, FortunaMinor, Bullish),
        // FortunaMinor
        (FortunaMinor, FortunaMajor, Via, Bullish),
        (FortunaMinor, Conjunctio, Amissio, Uncertain),
        (FortunaMinor, FortunaMinor, Populus, Uncertain),
        (FortunaMinor, Acquisitio, Carcer, Bullish),
        (FortunaMinor, Amissio, Conjunctio, Bearish),
        (FortunaMinor, Via, FortunaMajor, Bearish),
        (FortunaMinor, Populus, FortunaMinor, Bullish),
        (FortunaMinor, Carcer, Acquisitio, Uncertain),
        // Amissio
        (Amissio, Acquisitio, Via, Bullish),
        (Amissio, FortunaMajor, Carcer, Uncertain),
        (Amissio, Amissio, Populus, Bearish),
        (Amissio, FortunaMinor, Conjunctio, Uncertain),
        (Amissio, Populus, Amissio, Uncertain),
        (Amissio, Via, Acquisitio, Bearish),
        (Amissio, Conjunctio, FortunaMinor, Bearish),
        (Amissio, Carcer, FortunaMajor, Uncertain),
        // Carcer
        (Carcer, Populus, Carcer, Bullish),
        (Carcer, Via, Conjunctio, Bearish),
        (Carcer, Acquisitio, FortunaMinor, Bullish),
        (Carcer, Amissio, FortunaMajor, Uncertain),
        (Carcer, FortunaMajor, Amissio, Uncertain),
        (Carcer, FortunaMinor, Acquisitio, Uncertain),
        (Carcer, Carcer, Populus, Bearish),
        (Carcer, Conjunctio, Via, Uncertain),
        // Conjunctio
        (Conjunctio, Acquisitio, FortunaMajor, Bullish),
        (Conjunctio, Amissio, FortunaMinor, Uncertain),
        (Conjunctio, Conjunctio, Populus, Uncertain),
        (Conjunctio, Populus, Conjunctio, Bullish),
        (Conjunctio, Via, Carcer, Bearish),
        (Conjunctio, FortunaMajor, Acquisitio, Bullish),
        (Conjunctio, FortunaMinor, Amissio, Uncertain),
        (Conjunctio, Carcer, Via, Uncertain),
        // Acquisitio
        (Acquisitio, Populus, Acquisitio, Uncertain),
        (Acquisitio, Via, Amissio, Uncertain),
        (Acquisitio, Acquisitio, Populus, Bullish),
        (Acquisitio, Amissio, Via, Bearish),
        (Acquisitio, FortunaMajor, Conjunctio, Bullish),
        (Acquisitio, FortunaMinor, Carcer, Uncertain),
        (Acquisitio, Carcer, FortunaMinor, Uncertain),
        (Acquisitio, Conjunctio, FortunaMajor, Bullish),
        // FortunaMajor
        (FortunaMajor, FortunaMajor, Populus, Bullish),
        (FortunaMajor, Amissio, Carcer, Bearish),
        (FortunaMajor, Acquisitio, Conjunctio, Bullish),
        (FortunaMajor, Conjunctio, Acquisitio, Uncertain),
        (FortunaMajor, FortunaMinor, Via, Uncertain),
        (FortunaMajor, Carcer, Amissio, Uncertain),
        (FortunaMajor, Populus, FortunaMajor, Bullish),
        (FortunaMajor, Via, FortunaMinor, Uncertain),
        // Laetitia
        (Laetitia, CaputDraconis, Via, Bullish),
        (Laetitia, CaudaDraconis, Conjunctio, Bearish),
        (Laetitia, Albus, Amissio, Uncertain),
        (Laetitia, Rubeus, FortunaMinor, Uncertain),
        (Laetitia, Puella, FortunaMajor, Bullish),
        (Laetitia, Puer, Acquisitio, Bearish),
        (Laetitia, Tristitia, Carcer, Uncertain),
        (Laetitia, Laetitia, Populus, Uncertain),
        // Rubeus
        (Rubeus, Laetitia, FortunaMinor, Bullish),
        (Rubeus, Tristitia, Acquisitio, Uncertain),
        (Rubeus, Albus, Conjunctio, Uncertain),
        (Rubeus, CaputDraconis, FortunaMajor, Bullish),
        (Rubeus, CaudaDraconis, Amissio, Bearish),
        (Rubeus, Puella, Via, Bullish),
        (Rubeus, Puer, Carcer, Bearish),
        (Rubeus, Rubeus, Populus, Bearish),
        // Albus
        (Albus, Puer, Via, Bearish),
        (Albus, Puella, Carcer, Bullish),
        (Albus, Rubeus, Conjunctio, Uncertain),
        (Albus, Laetitia, Amissio, Bullish),
        (Albus, Tristitia, FortunaMajor, Uncertain),
        (Albus, CaputDraconis, Acquisitio, Bullish),
        (Albus, CaudaDraconis, FortunaMinor, Bearish),
        (Albus, Albus, Populus, Uncertain),
        // Tristitia
        (Tristitia, Tristitia, Populus, Uncertain),
        (Tristitia, Albus, FortunaMajor, Uncertain),
        (Tristitia, Rubeus, Acquisitio, Bearish),
        (Tristitia, Laetitia, Carcer, Uncertain),
        (Tristitia, Puer, FortunaMinor, Bearish),
        (Tristitia, Puella, Amissio, Uncertain),
        (Tristitia, CaputDraconis, Conjunctio, Bullish),
        (Tristitia, CaudaDraconis, Via, Bearish),
        // Populus
        (Populus, Populus, Populus, Uncertain),
        (Populus, FortunaMajor, FortunaMajor, Bullish),
        (Populus, FortunaMinor, FortunaMinor, Bullish),
        (Populus, Via, Via, Bearish),
        (Populus, Conjunctio, Conjunctio, Uncertain),
        (Populus, Carcer, Carcer, Bearish),
        (Populus, Acquisitio, Acquisitio, Uncertain),
        (Populus, Amissio, Amissio, Bullish),
    ]
};

/// Judgement of a witness pair and judge on a money question.
///
/// Only eight (first witness, judge) combinations are catalogued per second witness; any
/// other combination is uncertain.
pub fn witness_judgement(
    right: GeomanticFigure,
    left: GeomanticFigure,
    judge: GeomanticFigure,
) -> Polarity {
    WITNESS_JUDGEMENTS
        .iter()
        .find(|(w2, w1, j, _)| *w2 == left && *w1 == right && *j == judge)
        .map(|(_, _, _, polarity)| *polarity)
        .unwrap_or(Polarity::Uncertain)
}

/// Which step of the resolution produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionSource {
    PartOfFortune,
    Judgement,
    Reconciler,
    Undecided,
}

/// The resolved decision of a chart, together with the figures it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeomanticDecision {
    pub direction: Direction,
    pub source: DecisionSource,
    pub fortune: GeomanticFigure,
    pub judgement: Polarity,
    pub reconciler: GeomanticFigure,
}

/// Resolves the chart into a direction. The first decided step wins: the Part of Fortune
/// figure in its own house, then the witnesses and judge, then the reconciler in the money
/// house.
pub fn resolve(chart: &GeomanticChart) -> Result<GeomanticDecision, DivinationError> {
    let fortune_symbol = chart.house(chart.part_of_fortune).ok_or_else(|| DivinationError::Classification {
        kind: "part of fortune",
        symbol: chart.part_of_fortune.to_string(),
    })?;
    let fortune = GeomanticFigure::classify(&fortune_symbol)?;
    let right = GeomanticFigure::classify(&chart.witnesses[0])?;
    let left = GeomanticFigure::classify(&chart.witnesses[1])?;
    let judge = GeomanticFigure::classify(&chart.judge)?;
    let reconciler = GeomanticFigure::classify(&chart.reconciler)?;

    let judgement = witness_judgement(right, left, judge);
    let steps = [
        (house_meaning(fortune, chart.part_of_fortune), DecisionSource::PartOfFortune),
        (judgement, DecisionSource::Judgement),
        (house_meaning(reconciler, MONEY_HOUSE), DecisionSource::Reconciler),
    ];
    let (direction, source) = steps
        .iter()
        .find(|(polarity, _)| polarity.is_decided())
        .map(|(polarity, source)| (polarity.direction(), *source))
        .unwrap_or((Direction::Neutral, DecisionSource::Undecided));

    tracing::debug!(%fortune, %judge, %reconciler, ?source, %direction, "Resolved geomantic chart");
    Ok(GeomanticDecision { direction, source, fortune, judgement, reconciler })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::sym;
    use GeomanticFigure::*;

    #[test]
    fn test_house_meaning_lookup() {
        assert_eq!(house_meaning(Laetitia, 3), Polarity::Bearish);
        assert_eq!(house_meaning(Via, 1), Polarity::Bearish);
        assert_eq!(house_meaning(Puella, 5), Polarity::Uncertain);
        assert_eq!(house_meaning(Acquisitio, 13), Polarity::Bearish);
    }

    #[test]
    fn test_house_meaning_out_of_range_is_uncertain() {
        assert_eq!(house_meaning(FortunaMajor, 0), Polarity::Uncertain);
        assert_eq!(house_meaning(FortunaMajor, 14), Polarity::Uncertain);
    }

    #[test]
    fn test_witness_table_has_eight_entries_per_second_witness() {
        for figure in GeomanticFigure::ALL {
            let count = WITNESS_JUDGEMENTS.iter().filter(|(w2, _, _, _)| w2 == figure).count();
            assert_eq!(count, 8, "{}", figure);
        }
    }

    #[test]
    fn test_witness_judgement_lookup() {
        assert_eq!(witness_judgement(Puella, CaudaDraconis, Acquisitio), Polarity::Bullish);
        assert_eq!(witness_judgement(Populus, Via, Via), Polarity::Bearish);
        assert_eq!(witness_judgement(FortunaMajor, Populus, FortunaMajor), Polarity::Bullish);
        // Not catalogued.
        assert_eq!(witness_judgement(Albus, CaudaDraconis, FortunaMinor), Polarity::Uncertain);
    }

    #[test]
    fn test_fortune_decides_first() {
        let chart = GeomanticChart::from_mothers([sym([1, 0, 1, 1]), sym([0, 1, 0, 0]), sym([1, 1, 1, 0]), sym([0, 0, 1, 1])]);
        let decision = resolve(&chart).unwrap();
        assert_eq!(decision.fortune, FortunaMajor);
        assert_eq!(decision.source, DecisionSource::PartOfFortune);
        assert_eq!(decision.direction, Direction::Long);
        assert_eq!(decision.judgement, Polarity::Uncertain);
        assert_eq!(decision.reconciler, Amissio);
    }

    #[test]
    fn test_all_even_chart_is_decided_by_fortune_in_house_twelve() {
        // Every position is Populus; the fortune sits in house 12 (bullish for Populus).
        let chart = GeomanticChart::from_mothers([sym([0, 0, 0, 0]); 4]);
        let decision = resolve(&chart).unwrap();
        assert_eq!(decision.fortune, Populus);
        assert_eq!(decision.source, DecisionSource::PartOfFortune);
        assert_eq!(decision.direction, Direction::Long);
        assert_eq!(decision.judgement, Polarity::Uncertain);
    }

    fn resolve_mothers(mothers: [[u8; 4]; 4]) -> GeomanticDecision {
        resolve(&GeomanticChart::from_mothers(mothers.map(sym))).unwrap()
    }

    #[test]
    fn test_judgement_decides_long() {
        // Tristitia in house 2 is uncertain, so the witnesses and judge are read.
        let decision = resolve_mothers([[0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 0], [0, 1, 1, 1]]);
        assert_eq!(decision.fortune, Tristitia);
        assert_eq!(decision.judgement, Polarity::Bullish);
        assert_eq!(decision.source, DecisionSource::Judgement);
        assert_eq!(decision.direction, Direction::Long);
    }

    #[test]
    fn test_judgement_decides_short() {
        let decision = resolve_mothers([[0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 0], [1, 0, 1, 1]]);
        assert_eq!(decision.judgement, Polarity::Bearish);
        assert_eq!(decision.source, DecisionSource::Judgement);
        assert_eq!(decision.direction, Direction::Short);
    }

    #[test]
    fn test_reconciler_decides_long() {
        let decision = resolve_mothers([[0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 0], [1, 1, 0, 1]]);
        assert_eq!(decision.judgement, Polarity::Uncertain);
        assert_eq!(decision.reconciler, Laetitia);
        assert_eq!(decision.source, DecisionSource::Reconciler);
        assert_eq!(decision.direction, Direction::Long);
    }

    #[test]
    fn test_reconciler_decides_short() {
        let decision = resolve_mothers([[0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 1], [1, 0, 0, 1]]);
        assert_eq!(decision.judgement, Polarity::Uncertain);
        assert_eq!(decision.reconciler, Via);
        assert_eq!(decision.source, DecisionSource::Reconciler);
        assert_eq!(decision.direction, Direction::Short);
    }

    #[test]
    fn test_undecided_chart_is_neutral() {
        // Populus in house 10, an uncatalogued judgement and Conjunctio in house 2.
        let decision = resolve_mothers([[0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 1], [0, 0, 0, 1]]);
        assert_eq!(decision.fortune, Populus);
        assert_eq!(decision.reconciler, Conjunctio);
        assert_eq!(decision.source, DecisionSource::Undecided);
        assert_eq!(decision.direction, Direction::Neutral);
    }
}
