use crate::error::DivinationError;
use crate::figure::Figure;
use crate::generator;
use crate::geomancy::figure::GeomanticFigure;
use crate::symbol::{Bit, Symbol};
use core_types::{Kline, SymbolMethod};
use serde::Serialize;

/// A geomantic line-set of four lines.
pub type Tetragram = Symbol<4>;

/// Number of generated lines a chart consumes: four mothers of four lines each.
pub const CHART_LINES: usize = 16;

/// The sixteen positions of a shield chart, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Position {
    Mother(u8),
    Daughter(u8),
    Niece(u8),
    RightWitness,
    LeftWitness,
    Judge,
    Reconciler,
}

impl Position {
    pub const ALL: [Position; 16] = [
        Position::Mother(1),
        Position::Mother(2),
        Position::Mother(3),
        Position::Mother(4),
        Position::Daughter(1),
        Position::Daughter(2),
        Position::Daughter(3),
        Position::Daughter(4),
        Position::Niece(1),
        Position::Niece(2),
        Position::Niece(3),
        Position::Niece(4),
        Position::RightWitness,
        Position::LeftWitness,
        Position::Judge,
        Position::Reconciler,
    ];

    pub fn label(&self) -> String {
        match self {
            Position::Mother(n) => format!("Mother {}", n),
            Position::Daughter(n) => format!("Daughter {}", n),
            Position::Niece(n) => format!("Niece {}", n),
            Position::RightWitness => "Witness 1".to_string(),
            Position::LeftWitness => "Witness 2".to_string(),
            Position::Judge => "Judge".to_string(),
            Position::Reconciler => "Reconciler".to_string(),
        }
    }
}

/// A fully derived geomantic chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeomanticChart {
    pub mothers: [Tetragram; 4],
    pub daughters: [Tetragram; 4],
    pub nieces: [Tetragram; 4],
    pub witnesses: [Tetragram; 2],
    pub judge: Tetragram,
    pub reconciler: Tetragram,
    /// House (1..=12) selected by the Part of Fortune.
    pub part_of_fortune: u8,
}

impl GeomanticChart {
    /// Derives the chart from four mothers, oldest first.
    pub fn from_mothers(mothers: [Tetragram; 4]) -> Self {
        // Daughter i is built from line i of each mother.
        let mut daughters = [Tetragram::new([Bit::Even; 4]); 4];
        for (i, daughter) in daughters.iter_mut().enumerate() {
            *daughter = Tetragram::new([
                mothers[0].bits()[i],
                mothers[1].bits()[i],
                mothers[2].bits()[i],
                mothers[3].bits()[i],
            ]);
        }

        let nieces = [
            mothers[0] ^ mothers[1],
            mothers[2] ^ mothers[3],
            daughters[0] ^ daughters[1],
            daughters[2] ^ daughters[3],
        ];
        let witnesses = [nieces[0] ^ nieces[1], nieces[2] ^ nieces[3]];
        let judge = witnesses[0] ^ witnesses[1];
        // Money questions fall under the second house, so the reconciler pairs the judge
        // with the second daughter.
        let reconciler = judge ^ daughters[1];

        let ones: usize = mothers
            .iter()
            .chain(daughters.iter())
            .chain(nieces.iter())
            .map(Symbol::ones)
            .sum();
        let part_of_fortune = match (ones % 12) as u8 {
            0 => 12,
            house => house,
        };

        Self { mothers, daughters, nieces, witnesses, judge, reconciler, part_of_fortune }
    }

    /// Casts a chart from the newest candles: four disjoint windows of four lines each.
    pub fn cast(method: SymbolMethod, klines: &[Kline]) -> Result<Self, DivinationError> {
        let bits = generator::trailing_bits(method, klines, CHART_LINES)?;
        let mut mothers = [Tetragram::new([Bit::Even; 4]); 4];
        for (mother, chunk) in mothers.iter_mut().zip(bits.chunks_exact(4)) {
            *mother = Tetragram::try_from(chunk)
                .map_err(|available| DivinationError::InsufficientData { needed: 4, available })?;
        }
        let chart = Self::from_mothers(mothers);
        tracing::trace!(?method, part_of_fortune = chart.part_of_fortune, "Cast geomantic chart");
        Ok(chart)
    }

    /// The sixteen symbols in chart order.
    pub fn symbols(&self) -> [Tetragram; 16] {
        [
            self.mothers[0],
            self.mothers[1],
            self.mothers[2],
            self.mothers[3],
            self.daughters[0],
            self.daughters[1],
            self.daughters[2],
            self.daughters[3],
            self.nieces[0],
            self.nieces[1],
            self.nieces[2],
            self.nieces[3],
            self.witnesses[0],
            self.witnesses[1],
            self.judge,
            self.reconciler,
        ]
    }

    /// The symbol standing in a house (1..=12). Houses map onto mothers, daughters and nieces.
    pub fn house(&self, house: u8) -> Option<Tetragram> {
        if (1..=12).contains(&house) {
            Some(self.symbols()[usize::from(house) - 1])
        } else {
            None
        }
    }

    /// Classifies every position of the chart.
    pub fn figures(&self) -> Result<Vec<(Position, GeomanticFigure)>, DivinationError> {
        Position::ALL
            .iter()
            .zip(self.symbols().iter())
            .map(|(position, symbol)| Ok((*position, GeomanticFigure::classify(symbol)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::sym;
    use crate::test_support::klines_from_colors;

    fn example_chart() -> GeomanticChart {
        GeomanticChart::from_mothers([sym([1, 0, 1, 1]), sym([0, 1, 0, 0]), sym([1, 1, 1, 0]), sym([0, 0, 1, 1])])
    }

    #[test]
    fn test_chart_derivation() {
        let chart = example_chart();
        assert_eq!(
            chart.daughters,
            [sym([1, 0, 1, 0]), sym([0, 1, 1, 0]), sym([1, 0, 1, 1]), sym([1, 0, 0, 1])]
        );
        assert_eq!(chart.nieces[0], sym([1, 1, 1, 1]));
        assert_eq!(chart.nieces[1], sym([1, 1, 0, 1]));
        assert_eq!(chart.nieces[2], sym([1, 1, 0, 0]));
        assert_eq!(chart.nieces[3], sym([0, 0, 1, 0]));
        assert_eq!(chart.witnesses, [sym([0, 0, 1, 0]), sym([1, 1, 1, 0])]);
        assert_eq!(chart.judge, sym([1, 1, 0, 0]));
        assert_eq!(chart.reconciler, sym([1, 0, 1, 0]));
        // 9 odd lines in the mothers, 9 in the daughters, 10 in the nieces: 28 % 12 = 4.
        assert_eq!(chart.part_of_fortune, 4);
        assert_eq!(chart.house(4), Some(sym([0, 0, 1, 1])));
    }

    #[test]
    fn test_part_of_fortune_zero_maps_to_twelve() {
        let chart = GeomanticChart::from_mothers([sym([0, 0, 0, 0]); 4]);
        assert_eq!(chart.part_of_fortune, 12);
        assert_eq!(chart.judge, sym([0, 0, 0, 0]));
    }

    #[test]
    fn test_house_out_of_range() {
        let chart = example_chart();
        assert_eq!(chart.house(0), None);
        assert_eq!(chart.house(13), None);
    }

    #[test]
    fn test_figures_in_chart_order() {
        let figures = example_chart().figures().unwrap();
        assert_eq!(figures.len(), 16);
        assert_eq!(figures[0], (Position::Mother(1), GeomanticFigure::Puella));
        assert_eq!(figures[14], (Position::Judge, GeomanticFigure::FortunaMinor));
        assert_eq!(figures[15], (Position::Reconciler, GeomanticFigure::Amissio));
    }

    #[test]
    fn test_cast_uses_last_sixteen_candles_oldest_first() {
        // One extra leading candle that must be ignored.
        let colors = [0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1];
        let klines = klines_from_colors(&colors);
        let chart = GeomanticChart::cast(SymbolMethod::Color, &klines).unwrap();
        assert_eq!(chart, example_chart());
    }

    #[test]
    fn test_cast_needs_sixteen_candles() {
        let klines = klines_from_colors(&[1; 15]);
        let err = GeomanticChart::cast(SymbolMethod::Color, &klines).unwrap_err();
        assert_eq!(err, DivinationError::InsufficientData { needed: 16, available: 15 });
    }
}
