//! Turns a trailing window of candles into binary symbols.

use crate::error::DivinationError;
use crate::symbol::{Bit, Symbol};
use core_types::{Kline, SymbolMethod};
use rust_decimal::prelude::*;

/// Repeated cross sum: adds the digits until a single digit remains.
pub fn sum_digits(mut value: u64) -> u64 {
    while value > 9 {
        value = value / 10 + value % 10;
    }
    value
}

/// Parity of the digit sum of the truncated `value`.
///
/// Negative values are never reduced: their bit is the parity of the truncated integer
/// itself, so -15 is odd while 15 (digit sum 6) is even. `position` is only used to
/// locate the fault when `value` is not finite.
pub fn digit_sum_bit(value: f64, field: &'static str, position: usize) -> Result<Bit, DivinationError> {
    if !value.is_finite() {
        return Err(DivinationError::MissingData { field, position });
    }
    let truncated = value.trunc();
    // Saturating casts; magnitudes beyond u64 do not occur for real prices or returns.
    if truncated < 0.0 {
        return Ok(Bit::from_parity(truncated.abs() as u64));
    }
    Ok(Bit::from_parity(sum_digits(truncated as u64)))
}

/// Candle colour: even for a falling candle, or a flat one that still had a range.
pub fn color_bit(kline: &Kline) -> Bit {
    if kline.close < kline.open || (kline.close == kline.open && kline.low < kline.high) {
        Bit::Even
    } else {
        Bit::Odd
    }
}

fn close_f64(kline: &Kline, position: usize) -> Result<f64, DivinationError> {
    kline
        .close
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(DivinationError::MissingData { field: "close", position })
}

/// Derives one bit per step of `klines`.
///
/// Colour and price modes yield one bit per candle; the return modes yield one bit per
/// consecutive pair, so `klines.len() - 1` bits.
pub fn bit_series(method: SymbolMethod, klines: &[Kline]) -> Result<Vec<Bit>, DivinationError> {
    match method {
        SymbolMethod::Color => Ok(klines.iter().map(color_bit).collect()),
        SymbolMethod::Price => klines
            .iter()
            .enumerate()
            .map(|(i, k)| digit_sum_bit(close_f64(k, i)?, "close", i))
            .collect(),
        SymbolMethod::Returns => klines
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let previous = close_f64(&pair[0], i)?;
                let current = close_f64(&pair[1], i + 1)?;
                let pct = (current / previous - 1.0) * 100.0;
                digit_sum_bit(pct, "return", i + 1)
            })
            .collect(),
        SymbolMethod::LogReturns => klines
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let previous = close_f64(&pair[0], i)?;
                let current = close_f64(&pair[1], i + 1)?;
                let log_return = (current / previous).ln() * 100.0;
                digit_sum_bit(log_return, "log return", i + 1)
            })
            .collect(),
    }
}

/// Takes the last `N` bits of a series as a symbol.
pub fn trailing_symbol<const N: usize>(bits: &[Bit]) -> Result<Symbol<N>, DivinationError> {
    if bits.len() < N {
        return Err(DivinationError::InsufficientData { needed: N, available: bits.len() });
    }
    Symbol::try_from(&bits[bits.len() - N..])
        .map_err(|available| DivinationError::InsufficientData { needed: N, available })
}

/// Generates a symbol of length `N` from the newest candles of `klines`.
///
/// Only the trailing window the method needs is read; older candles never influence
/// the result.
pub fn generate<const N: usize>(method: SymbolMethod, klines: &[Kline]) -> Result<Symbol<N>, DivinationError> {
    let bits = trailing_bits(method, klines, N)?;
    trailing_symbol(&bits)
}

/// Generates the last `count` bits using only the candles those bits depend on.
pub fn trailing_bits(method: SymbolMethod, klines: &[Kline], count: usize) -> Result<Vec<Bit>, DivinationError> {
    let needed = method.klines_for(count);
    if klines.len() < needed {
        return Err(DivinationError::InsufficientData { needed, available: klines.len() });
    }
    bit_series(method, &klines[klines.len() - needed..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::sym;
    use crate::test_support::{kline, klines_from_closes};
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_digits_fixed_point() {
        for x in 0..=9 {
            assert_eq!(sum_digits(x), x);
        }
        assert_eq!(sum_digits(123), 6);
        assert_eq!(sum_digits(99), 9);
        assert_eq!(sum_digits(38_947), 4);
    }

    #[test]
    fn test_digit_sum_bit_rejects_non_finite() {
        assert_eq!(digit_sum_bit(f64::NAN, "close", 2), Err(DivinationError::MissingData { field: "close", position: 2 }));
        assert!(digit_sum_bit(f64::INFINITY, "return", 0).is_err());
        assert_eq!(digit_sum_bit(12.9, "close", 0).unwrap(), Bit::Odd);
    }

    #[test]
    fn test_negative_values_keep_their_own_parity() {
        // -15 is odd as an integer, while 15 reduces to 6.
        assert_eq!(digit_sum_bit(-15.7, "return", 0).unwrap(), Bit::Odd);
        assert_eq!(digit_sum_bit(-15.0, "return", 0).unwrap(), Bit::Odd);
        assert_eq!(digit_sum_bit(15.0, "return", 0).unwrap(), Bit::Even);
        assert_eq!(digit_sum_bit(-38.2, "log return", 0).unwrap(), Bit::Even);
        assert_eq!(digit_sum_bit(-0.4, "return", 0).unwrap(), Bit::Even);
    }

    #[test]
    fn test_color_bits() {
        let falling = kline(dec!(10), dec!(12), dec!(8), dec!(9));
        let rising = kline(dec!(9), dec!(12), dec!(8), dec!(10));
        let doji_with_range = kline(dec!(10), dec!(11), dec!(9), dec!(10));
        let flat = kline(dec!(10), dec!(10), dec!(10), dec!(10));
        assert_eq!(color_bit(&falling), Bit::Even);
        assert_eq!(color_bit(&rising), Bit::Odd);
        assert_eq!(color_bit(&doji_with_range), Bit::Even);
        assert_eq!(color_bit(&flat), Bit::Odd);
    }

    #[test]
    fn test_color_mode_reversal_reverses_symbol() {
        let window = vec![
            kline(dec!(10), dec!(12), dec!(8), dec!(9)),
            kline(dec!(9), dec!(12), dec!(8), dec!(10)),
            kline(dec!(11), dec!(12), dec!(8), dec!(10)),
            kline(dec!(11), dec!(12), dec!(8), dec!(9)),
        ];
        let forward: Symbol<4> = generate(SymbolMethod::Color, &window).unwrap();
        let reversed_window: Vec<_> = window.iter().rev().cloned().collect();
        let backward: Symbol<4> = generate(SymbolMethod::Color, &reversed_window).unwrap();
        assert_eq!(forward, sym([0, 1, 0, 0]));
        assert_eq!(backward, forward.reversed());
        // Same input, same output.
        assert_eq!(generate::<4>(SymbolMethod::Color, &window).unwrap(), forward);
    }

    #[test]
    fn test_price_mode_uses_trailing_closes() {
        // Digit sums: 123 -> 6, 47 -> 2, 15 -> 6, 101 -> 2, 88 -> 7
        let klines = klines_from_closes(&[dec!(123), dec!(47.5), dec!(15), dec!(101.99), dec!(88)]);
        let symbol: Symbol<3> = generate(SymbolMethod::Price, &klines).unwrap();
        assert_eq!(symbol, sym([0, 0, 1]));
    }

    #[test]
    fn test_returns_mode_needs_one_extra_candle() {
        // Returns: +10% -> 1 (odd), -50% -> -50 (even), +300% -> 3 (odd)
        let klines = klines_from_closes(&[dec!(100), dec!(110), dec!(55), dec!(220)]);
        let symbol: Symbol<3> = generate(SymbolMethod::Returns, &klines).unwrap();
        assert_eq!(symbol, sym([1, 0, 1]));

        let short = &klines[1..];
        assert_eq!(
            generate::<3>(SymbolMethod::Returns, short),
            Err(DivinationError::InsufficientData { needed: 4, available: 3 })
        );
    }

    #[test]
    fn test_log_returns_mode() {
        // 100 * ln(2) = 69.3 -> 6 + 9 = 15 -> 6 (even); 100 * ln(0.5) = -69.3 -> -69 (odd)
        let klines = klines_from_closes(&[dec!(50), dec!(100), dec!(50)]);
        let symbol: Symbol<2> = generate(SymbolMethod::LogReturns, &klines).unwrap();
        assert_eq!(symbol, sym([0, 1]));
    }

    #[test]
    fn test_zero_close_is_missing_data() {
        let klines = klines_from_closes(&[dec!(0), dec!(10), dec!(12)]);
        let err = generate::<2>(SymbolMethod::Returns, &klines).unwrap_err();
        assert_eq!(err, DivinationError::MissingData { field: "return", position: 1 });

        let err = generate::<2>(SymbolMethod::LogReturns, &klines).unwrap_err();
        assert!(matches!(err, DivinationError::MissingData { .. }));
    }

    #[test]
    fn test_stale_candles_outside_window_are_ignored() {
        // The zero close is outside the trailing window of a 2-bit return symbol.
        let klines = klines_from_closes(&[dec!(0), dec!(10), dec!(11), dec!(12)]);
        assert!(generate::<2>(SymbolMethod::Returns, &klines).is_ok());
    }
}
