use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitXor;

/// One line of a figure. `Even` is the yin/passive line, `Odd` the yang/active line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    Even,
    Odd,
}

impl Bit {
    pub const fn from_parity(value: u64) -> Self {
        if value % 2 == 0 { Bit::Even } else { Bit::Odd }
    }

    pub const fn value(self) -> u8 {
        match self {
            Bit::Even => 0,
            Bit::Odd => 1,
        }
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        if self == rhs { Bit::Even } else { Bit::Odd }
    }
}

/// A fixed-length binary symbol. Index 0 is the first (oldest) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol<const N: usize>([Bit; N]);

impl<const N: usize> Symbol<N> {
    pub const fn new(bits: [Bit; N]) -> Self {
        Self(bits)
    }

    /// Builds a symbol from a pattern where the first line is the most significant bit.
    pub fn from_pattern(pattern: u8) -> Self {
        let mut bits = [Bit::Even; N];
        for (i, bit) in bits.iter_mut().enumerate() {
            let shift = N - 1 - i;
            *bit = Bit::from_parity(u64::from(pattern >> shift));
        }
        Self(bits)
    }

    pub fn bits(&self) -> &[Bit; N] {
        &self.0
    }

    /// The pattern value of the symbol, first line most significant.
    pub fn pattern(&self) -> u8 {
        self.0.iter().fold(0u8, |acc, bit| (acc << 1) | bit.value())
    }

    /// Number of odd lines.
    pub fn ones(&self) -> usize {
        self.0.iter().filter(|bit| **bit == Bit::Odd).count()
    }

    /// Line-wise combination of two figures: even where the lines agree, odd where they differ.
    pub fn combine(&self, other: &Self) -> Self {
        let mut bits = [Bit::Even; N];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = self.0[i] ^ other.0[i];
        }
        Self(bits)
    }

    pub fn reversed(&self) -> Self {
        let mut bits = self.0;
        bits.reverse();
        Self(bits)
    }
}

impl<const N: usize> BitXor for Symbol<N> {
    type Output = Symbol<N>;

    fn bitxor(self, rhs: Symbol<N>) -> Symbol<N> {
        self.combine(&rhs)
    }
}

impl<const N: usize> TryFrom<&[Bit]> for Symbol<N> {
    type Error = usize;

    /// Fails with the slice length when it does not match `N`.
    fn try_from(bits: &[Bit]) -> Result<Self, Self::Error> {
        let array: [Bit; N] = bits.try_into().map_err(|_| bits.len())?;
        Ok(Self(array))
    }
}

impl<const N: usize> fmt::Display for Symbol<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, bit) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", bit.value())?;
        }
        f.write_str("]")
    }
}

impl<const N: usize> Serialize for Symbol<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bits: Vec<u8> = self.0.iter().map(|bit| bit.value()).collect();
        bits.serialize(serializer)
    }
}

/// Shorthand used by tests and tables: `sym([1, 0, 1, 1])`.
pub fn sym<const N: usize>(values: [u8; N]) -> Symbol<N> {
    let mut bits = [Bit::Even; N];
    for (bit, value) in bits.iter_mut().zip(values) {
        *bit = Bit::from_parity(u64::from(value));
    }
    Symbol(bits)
}
