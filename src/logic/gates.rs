//! Combinational word-level logic.
//!
//! Provides the primitive gates the rest of the machine is composed
//! from: bitwise negation and conjunction, ripple-carry addition, and
//! the 2-to-1 word multiplexer. All of them are pure functions — inputs
//! in, a fresh [`Word`] out, no state anywhere.

use crate::logic::{Bit, Word};

/// Bitwise complement, one output bit per input bit.
pub fn not(a: &Word) -> Word {
    let mut bits = [Bit::O; 16];
    for i in 0..16 {
        bits[i] = a.get(i).not();
    }
    Word::from_bits(bits)
}

/// Bitwise AND, positionally.
pub fn and(a: &Word, b: &Word) -> Word {
    let mut bits = [Bit::O; 16];
    for i in 0..16 {
        bits[i] = a.get(i).and(b.get(i));
    }
    Word::from_bits(bits)
}

/// 16-bit two's-complement addition.
///
/// Ripple-carry from the least significant bit (index 15) toward the
/// most significant (index 0), initial carry-in zero. The carry out of
/// bit 0 is discarded, so the sum wraps modulo 2^16 — exactly the
/// two's-complement behavior. No overflow flag is exposed.
pub fn adder(a: &Word, b: &Word) -> Word {
    let mut bits = [Bit::O; 16];
    let mut carry = Bit::O;

    for i in (0..16).rev() {
        let (sum, carry_out) = a.get(i).full_add(b.get(i), carry);
        bits[i] = sum;
        carry = carry_out;
    }

    Word::from_bits(bits)
}

/// 2-to-1 word selector: `in1` when control is 0, `in2` when control is 1.
///
/// The control line is a [`Bit`], so no out-of-range selector can reach
/// this gate.
pub fn mux(in1: &Word, in2: &Word, control: Bit) -> Word {
    match control {
        Bit::O => *in1,
        Bit::I => *in2,
    }
}
