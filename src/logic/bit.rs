//! Single binary digit (bit).
//!
//! A bit can hold one of two values: 0 or 1. Nothing else is
//! representable, so a malformed control or data bit cannot be
//! constructed in the first place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single binary digit.
///
/// All the signal lines of the machine — data words, write enables,
/// ALU control inputs — are built out of this type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    /// Zero (low)
    O = 0,
    /// One (high)
    I = 1,
}

impl Bit {
    /// Both bit values in order: O, I.
    pub const ALL: [Bit; 2] = [Bit::O, Bit::I];

    /// Create a bit from an integer value.
    ///
    /// # Panics
    /// Panics if value is not in {0, 1}.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Bit::O,
            1 => Bit::I,
            _ => panic!("Invalid bit value: {} (must be 0 or 1)", value),
        }
    }

    /// Convert to an integer value.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Logical complement (0 ↔ 1).
    #[inline]
    pub const fn not(self) -> Self {
        match self {
            Bit::O => Bit::I,
            Bit::I => Bit::O,
        }
    }

    /// Logical conjunction.
    #[inline]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Bit::I, Bit::I) => Bit::I,
            _ => Bit::O,
        }
    }

    /// Logical disjunction.
    #[inline]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Bit::O, Bit::O) => Bit::O,
            _ => Bit::I,
        }
    }

    /// Exclusive or.
    #[inline]
    pub const fn xor(self, other: Self) -> Self {
        match (self, other) {
            (Bit::O, Bit::O) | (Bit::I, Bit::I) => Bit::O,
            _ => Bit::I,
        }
    }

    /// Full adder: adds two bits plus a carry-in, returns (sum, carry_out).
    #[inline]
    pub const fn full_add(self, other: Self, carry_in: Self) -> (Self, Self) {
        // Sum is the parity of the three inputs.
        let sum = self.xor(other).xor(carry_in);

        // Carry out whenever at least two inputs are set.
        let carry_out = self.and(other).or(self.xor(other).and(carry_in));

        (sum, carry_out)
    }

    /// Returns true if this bit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, Bit::O)
    }

    /// Returns true if this bit is one.
    #[inline]
    pub const fn is_set(self) -> bool {
        matches!(self, Bit::I)
    }
}

impl Default for Bit {
    fn default() -> Self {
        Bit::O
    }
}

impl fmt::Debug for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bit::O => write!(f, "0"),
            Bit::I => write!(f, "1"),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bit::O => write!(f, "0"),
            Bit::I => write!(f, "1"),
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::I
        } else {
            Bit::O
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_set()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.to_u8()
    }
}
