//! I-Ching readings: a hexagram with the trigram and bigram taken from its newest lines.

use crate::error::DivinationError;
use crate::figure::{Figure, figure_table};
use crate::generator;
use crate::symbol::Symbol;
use core_types::{Direction, Kline, Polarity, SymbolMethod};
use serde::Serialize;

figure_table! {
    /// The eight trigrams. A set bit is a yang line.
    pub enum Trigram (3 lines, "trigram") {
        Heaven = ("Heaven", 0b111),
        Earth = ("Earth", 0b000),
        Thunder = ("Thunder", 0b001),
        Water = ("Water", 0b010),
        Mountain = ("Mountain", 0b100),
        Wind = ("Wind", 0b110),
        Fire = ("Fire", 0b101),
        Lake = ("Lake", 0b011),
    }
}

figure_table! {
    /// The four bigrams, named after the seasons.
    pub enum Bigram (2 lines, "bigram") {
        Summer = ("Summer", 0b11),
        Spring = ("Spring", 0b01),
        Fall = ("Fall", 0b10),
        Winter = ("Winter", 0b00),
    }
}

figure_table! {
    /// The sixty-four hexagrams, declared in King Wen order.
    pub enum Hexagram (6 lines, "hexagram") {
        Creative = ("Creative", 0b111111),
        Receptive = ("Receptive", 0b000000),
        Difficulty = ("Difficulty", 0b010001),
        Folly = ("Folly", 0b100010),
        Waiting = ("Waiting", 0b010111),
        Conflict = ("Conflict", 0b111010),
        Army = ("Army", 0b000010),
        Union = ("Union", 0b010000),
        SmallTaming = ("Small Taming", 0b110111),
        Treading = ("Treading", 0b111011),
        Peace = ("Peace", 0b000111),
        Standstill = ("Standstill", 0b111000),
        Fellowship = ("Fellowship", 0b111101),
        Possession = ("Possession", 0b101111),
        Modesty = ("Modesty", 0b000100),
        Enthusiasm = ("Enthusiasm", 0b001000),
        Following = ("Following", 0b011001),
        Decay = ("Decay", 0b100110),
        Approach = ("Approach", 0b000011),
        View = ("View", 0b110000),
        Biting = ("Biting", 0b101001),
        Grace = ("Grace", 0b100101),
        Splitting = ("Splitting", 0b100000),
        Return = ("Return", 0b000001),
        Innocence = ("Innocence", 0b111001),
        GreatTaming = ("Great Taming", 0b100111),
        Mouth = ("Mouth", 0b100001),
        Preponderance = ("Preponderance", 0b011110),
        Abysmal = ("Abysmal", 0b010010),
        Clinging = ("Clinging", 0b101101),
        Influence = ("Influence", 0b011100),
        Duration = ("Duration", 0b001110),
        Retreat = ("Retreat", 0b111100),
        Power = ("Power", 0b001111),
        Progress = ("Progress", 0b101000),
        Darkening = ("Darkening", 0b000101),
        Family = ("Family", 0b110101),
        Opposition = ("Opposition", 0b101011),
        Obstruction = ("Obstruction", 0b010100),
        Deliverance = ("Deliverance", 0b001010),
        Decrease = ("Decrease", 0b100011),
        Increase = ("Increase", 0b110001),
        Resoluteness = ("Resoluteness", 0b011111),
        Coming = ("Coming", 0b111110),
        Gathering = ("Gathering", 0b011000),
        Pushing = ("Pushing", 0b000110),
        Oppression = ("Oppression", 0b011010),
        Well = ("Well", 0b010110),
        Revolution = ("Revolution", 0b011101),
        Cauldron = ("Cauldron", 0b101110),
        Arousing = ("Arousing", 0b001001),
        Still = ("Still", 0b100100),
        Development = ("Development", 0b110100),
        Marrying = ("Marrying", 0b001011),
        Abundance = ("Abundance", 0b001101),
        Wanderer = ("Wanderer", 0b101100),
        Gentle = ("Gentle", 0b110110),
        Joyous = ("Joyous", 0b011011),
        Dispersion = ("Dispersion", 0b110010),
        Limitation = ("Limitation", 0b010011),
        Truth = ("Truth", 0b110011),
        Small = ("Small", 0b001100),
        After = ("After", 0b010101),
        Before = ("Before", 0b101010),
    }
}

impl Trigram {
    pub fn polarity(self) -> Polarity {
        match self {
            Trigram::Wind | Trigram::Water | Trigram::Mountain | Trigram::Earth => Polarity::Bullish,
            Trigram::Heaven | Trigram::Lake | Trigram::Fire | Trigram::Thunder => Polarity::Bearish,
        }
    }
}

impl Bigram {
    pub fn polarity(self) -> Polarity {
        match self {
            Bigram::Fall | Bigram::Winter => Polarity::Bullish,
            Bigram::Summer | Bigram::Spring => Polarity::Bearish,
        }
    }
}

impl Hexagram {
    /// Position in the King Wen sequence, 1..=64.
    pub fn king_wen_number(self) -> u8 {
        Hexagram::ALL
            .iter()
            .position(|hexagram| *hexagram == self)
            .map_or(0, |index| index as u8 + 1)
    }
}

/// Number of generated lines a reading consumes.
pub const READING_LINES: usize = 6;

/// A full reading of the newest lines of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IChingReading {
    pub hexagram: Hexagram,
    pub trigram: Trigram,
    pub bigram: Bigram,
    pub direction: Direction,
}

impl IChingReading {
    /// Reads the trailing window. The trigram and bigram are the newest three and two
    /// lines of the hexagram.
    pub fn read(method: SymbolMethod, klines: &[Kline]) -> Result<Self, DivinationError> {
        let bits = generator::trailing_bits(method, klines, READING_LINES)?;
        let hexagram = Hexagram::classify(&generator::trailing_symbol::<6>(&bits)?)?;
        let trigram = Trigram::classify(&generator::trailing_symbol::<3>(&bits)?)?;
        let bigram = Bigram::classify(&generator::trailing_symbol::<2>(&bits)?)?;
        let reading = Self::from_figures(hexagram, trigram, bigram);
        tracing::debug!(%hexagram, %trigram, %bigram, direction = %reading.direction, "I-Ching reading");
        Ok(reading)
    }

    pub fn from_figures(hexagram: Hexagram, trigram: Trigram, bigram: Bigram) -> Self {
        Self { hexagram, trigram, bigram, direction: reading_direction(trigram, bigram) }
    }

    /// Builds a reading from an already generated hexagram symbol.
    pub fn from_symbol(symbol: &Symbol<6>) -> Result<Self, DivinationError> {
        let bits = symbol.bits();
        let hexagram = Hexagram::classify(symbol)?;
        let trigram = Trigram::classify(&generator::trailing_symbol::<3>(bits)?)?;
        let bigram = Bigram::classify(&generator::trailing_symbol::<2>(bits)?)?;
        Ok(Self::from_figures(hexagram, trigram, bigram))
    }
}

/// Long if either the trigram or the bigram is bullish, otherwise short if either is bearish.
pub fn reading_direction(trigram: Trigram, bigram: Bigram) -> Direction {
    let polarities = [trigram.polarity(), bigram.polarity()];
    if polarities.contains(&Polarity::Bullish) {
        Direction::Long
    } else if polarities.contains(&Polarity::Bearish) {
        Direction::Short
    } else {
        Direction::Neutral
    }
}
