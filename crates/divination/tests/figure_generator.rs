use chrono::{Duration, TimeZone, Utc};
use core_types::{Direction, Kline, Polarity, SymbolMethod};
use divination::geomancy::{self, DecisionSource, Tetragram};
use divination::symbol::sym;
use divination::{Bigram, Figure, GeomanticChart, GeomanticFigure, Hexagram, IChingReading, Symbol, Trigram, generator};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn candle(index: usize, open: Decimal, close: Decimal) -> Kline {
    let open_time = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap() + Duration::hours(index as i64);
    Kline {
        open_time,
        open,
        high: open.max(close) + dec!(1),
        low: open.min(close) - dec!(1),
        close,
        volume: dec!(10),
        close_time: open_time + Duration::hours(1),
        interval: "1h".to_string(),
    }
}

fn colored(colors: &[u8]) -> Vec<Kline> {
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| if *c == 0 { candle(i, dec!(101), dec!(100)) } else { candle(i, dec!(100), dec!(101)) })
        .collect()
}

fn closes(values: &[i64]) -> Vec<Kline> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| candle(i, Decimal::from(*v), Decimal::from(*v)))
        .collect()
}

#[test]
fn geomancy_end_to_end_from_candle_colours() {
    let klines = colored(&[1, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1]);
    let (chart, decision) = geomancy::divine(SymbolMethod::Color, &klines).unwrap();

    let names: Vec<&str> = chart.figures().unwrap().iter().map(|(_, f)| f.name()).collect();
    assert_eq!(&names[..4], ["Puella", "Rubeus", "Cauda Draconis", "Fortuna Major"]);
    assert_eq!(chart.part_of_fortune, 4);
    assert_eq!(decision.fortune, GeomanticFigure::FortunaMajor);
    assert_eq!(decision.source, DecisionSource::PartOfFortune);
    assert_eq!(decision.direction, Direction::Long);
}

#[test]
fn geomancy_price_mode_uses_digit_sums() {
    // Odd digit sums (1, 3, 5, 7) give odd lines, even ones (2, 4) give even lines.
    let values = [1, 2, 3, 4, 10, 11, 12, 13, 22, 5, 7, 40, 16, 25, 61, 70];
    let chart = GeomanticChart::cast(SymbolMethod::Price, &closes(&values)).unwrap();
    assert_eq!(chart.mothers[0], sym([1, 0, 1, 0]));
    assert_eq!(chart.mothers[1], sym([1, 0, 1, 0]));
    assert_eq!(chart.mothers[2], sym([0, 1, 1, 0]));
    assert_eq!(chart.mothers[3], sym([1, 1, 1, 1]));
}

#[test]
fn iching_wind_and_fall_read_long() {
    let reading = IChingReading::from_figures(Hexagram::Creative, Trigram::Wind, Bigram::Fall);
    assert_eq!(reading.direction, Direction::Long);
    let reading = IChingReading::from_figures(Hexagram::Creative, Trigram::Lake, Bigram::Summer);
    assert_eq!(reading.direction, Direction::Short);
}

#[test]
fn iching_returns_mode_needs_seven_candles() {
    let klines = closes(&[100, 110, 121, 133, 146, 160]);
    let err = IChingReading::read(SymbolMethod::Returns, &klines).unwrap_err();
    assert_eq!(err, divination::DivinationError::InsufficientData { needed: 7, available: 6 });
}

#[test]
fn nature_and_house_meanings_are_independent() {
    // Via is yang by nature but bearish in the first house.
    assert_eq!(GeomanticFigure::Via.nature(), Polarity::Bullish);
    assert_eq!(geomancy::house_meaning(GeomanticFigure::Via, 1), Polarity::Bearish);
}

fn tetragram() -> impl Strategy<Value = Tetragram> {
    (0u8..16).prop_map(Symbol::from_pattern)
}

proptest! {
    #[test]
    fn combine_is_commutative_and_self_cancelling(a in tetragram(), b in tetragram()) {
        prop_assert_eq!(a.combine(&b), b.combine(&a));
        prop_assert_eq!(a.combine(&a), sym([0, 0, 0, 0]));
        prop_assert_eq!(a.combine(&b).combine(&b), a);
    }

    #[test]
    fn every_chart_classifies_and_has_a_house(m in prop::array::uniform4(tetragram())) {
        let chart = GeomanticChart::from_mothers(m);
        prop_assert!((1..=12).contains(&chart.part_of_fortune));
        prop_assert_eq!(chart.figures().unwrap().len(), 16);
        prop_assert!(geomancy::resolve(&chart).is_ok());
    }

    #[test]
    fn every_pattern_names_one_figure(pattern in 0u8..64) {
        let hexagram = Hexagram::classify(&Symbol::<6>::from_pattern(pattern)).unwrap();
        prop_assert_eq!(hexagram.pattern(), pattern);
        prop_assert!((1..=64).contains(&hexagram.king_wen_number()));
        let trigram = Trigram::classify(&Symbol::<3>::from_pattern(pattern & 0b111)).unwrap();
        prop_assert_eq!(trigram.pattern(), pattern & 0b111);
    }

    #[test]
    fn older_candles_never_change_the_symbol(
        window in prop::collection::vec(0u8..2, 6),
        history in prop::collection::vec(0u8..2, 0..20),
    ) {
        let recent = colored(&window);
        let mut all = history.clone();
        all.extend_from_slice(&window);
        let longer = colored(&all);
        let a: Symbol<6> = generator::generate(SymbolMethod::Color, &recent).unwrap();
        let b: Symbol<6> = generator::generate(SymbolMethod::Color, &longer).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn digit_sum_is_a_single_digit(value in 0u64..1_000_000_000) {
        let sum = generator::sum_digits(value);
        prop_assert!(sum <= 9);
        prop_assert_eq!(sum % 9, value % 9);
    }
}
