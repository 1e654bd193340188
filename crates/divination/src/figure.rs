//! The closed enumerations of named figures and their classification.
//!
//! Every figure type is declared through [`figure_table!`], which emits the enum, its
//! canonical bit patterns, and a lookup table indexed by pattern value. The lookup table
//! is built at compile time by inverting the pattern of every variant, so classification
//! is a single array access.

use crate::error::DivinationError;
use crate::symbol::Symbol;

/// A named figure over binary symbols of a fixed length.
pub trait Figure: Copy + Eq + Sized + 'static {
    /// Number of lines.
    const LEN: usize;
    /// Human-readable family name used in errors.
    const KIND: &'static str;

    fn all() -> &'static [Self];
    fn pattern(self) -> u8;
    fn name(self) -> &'static str;
    fn from_pattern(pattern: u8) -> Option<Self>;

    /// Classifies a symbol. A length mismatch or an unmapped pattern is an internal fault.
    fn classify<const N: usize>(symbol: &Symbol<N>) -> Result<Self, DivinationError> {
        let fault = || DivinationError::Classification { kind: Self::KIND, symbol: symbol.to_string() };
        if N != Self::LEN {
            return Err(fault());
        }
        Self::from_pattern(symbol.pattern()).ok_or_else(fault)
    }

    /// The canonical symbol of this figure.
    fn symbol<const N: usize>(self) -> Symbol<N> {
        Symbol::from_pattern(self.pattern())
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|figure| figure.name() == name)
    }
}

/// Declares a figure enumeration with `Name = ("Display name", 0bPATTERN)` variants.
macro_rules! figure_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident ($len:literal lines, $kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = ($name:literal, $pattern:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $ty {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub const fn pattern(self) -> u8 {
                match self {
                    $( $ty::$variant => $pattern ),+
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $( $ty::$variant => $name ),+
                }
            }

            const BY_PATTERN: [Option<$ty>; 1 << $len] = {
                let mut table = [None; 1 << $len];
                let mut i = 0;
                while i < Self::ALL.len() {
                    let figure = Self::ALL[i];
                    table[figure.pattern() as usize] = Some(figure);
                    i += 1;
                }
                table
            };
        }

        impl $crate::figure::Figure for $ty {
            const LEN: usize = $len;
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn pattern(self) -> u8 {
                $ty::pattern(self)
            }

            fn name(self) -> &'static str {
                $ty::name(self)
            }

            fn from_pattern(pattern: u8) -> Option<Self> {
                Self::BY_PATTERN.get(pattern as usize).copied().flatten()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($ty::name(*self))
            }
        }
    };
}

pub(crate) use figure_table;
