//! The arithmetic-logic unit.
//!
//! Composes the primitive gates under six control bits (zx, nx, zy,
//! ny, f, no) plus two status outputs. The six bits select one of 18
//! documented functions of the x and y operands:
//!
//! ```text
//! zx nx zy ny f no   out
//!  1  0  1  0 1  0   0
//!  1  1  1  1 1  1   1
//!  1  1  1  0 1  0   -1
//!  0  0  1  1 0  0   x
//!  1  1  0  0 0  0   y
//!  0  0  1  1 0  1   !x
//!  1  1  0  0 0  1   !y
//!  0  0  1  1 1  1   -x
//!  1  1  0  0 1  1   -y
//!  0  1  1  1 1  1   x+1
//!  1  1  0  1 1  1   y+1
//!  0  0  1  1 1  0   x-1
//!  1  1  0  0 1  0   y-1
//!  0  0  0  0 1  0   x+y
//!  0  1  0  0 1  1   x-y
//!  0  0  0  1 1  1   y-x
//!  0  0  0  0 0  0   x&y
//!  0  1  0  1 0  1   x|y
//! ```
//!
//! The simulator does not special-case any row: the six-step procedure
//! in [`alu`] reproduces the whole table by construction.

use crate::logic::{gates, Bit, Word};
use serde::{Deserialize, Serialize};

/// The six ALU control bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AluControl {
    /// Zero the x operand.
    pub zx: Bit,
    /// Complement the x operand (after zx).
    pub nx: Bit,
    /// Zero the y operand.
    pub zy: Bit,
    /// Complement the y operand (after zy).
    pub ny: Bit,
    /// Function select: 1 = add, 0 = and.
    pub f: Bit,
    /// Complement the output.
    pub no: Bit,
}

/// The ALU result: output word plus status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AluOutput {
    /// The computed function of x and y.
    pub out: Word,
    /// 1 iff every bit of `out` is zero.
    pub zr: Bit,
    /// 1 iff the most significant bit of `out` is set (out < 0 in
    /// two's complement).
    pub ng: Bit,
}

/// Evaluate the ALU.
///
/// Pure function of its inputs — no state is held between calls, and
/// the steps apply in a fixed order, each to the running value:
/// zx zeroes x, nx complements it, zy/ny do the same for y, f picks
/// add or and, no complements the result.
pub fn alu(x: &Word, y: &Word, control: AluControl) -> AluOutput {
    let mut x = *x;
    let mut y = *y;

    if control.zx.is_set() {
        x = Word::zero();
    }
    if control.nx.is_set() {
        x = gates::not(&x);
    }
    if control.zy.is_set() {
        y = Word::zero();
    }
    if control.ny.is_set() {
        y = gates::not(&y);
    }

    let mut out = if control.f.is_set() {
        gates::adder(&x, &y)
    } else {
        gates::and(&x, &y)
    };

    if control.no.is_set() {
        out = gates::not(&out);
    }

    let zr = Bit::from(out.is_zero());
    let ng = out.msb();

    AluOutput { out, zr, ng }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctl(zx: u8, nx: u8, zy: u8, ny: u8, f: u8, no: u8) -> AluControl {
        AluControl {
            zx: Bit::from_u8(zx),
            nx: Bit::from_u8(nx),
            zy: Bit::from_u8(zy),
            ny: Bit::from_u8(ny),
            f: Bit::from_u8(f),
            no: Bit::from_u8(no),
        }
    }

    const SAMPLES: [(i16, i16); 7] = [
        (0, 0),
        (1, 2),
        (17, 2),
        (-1, 1),
        (-32768, 32767),
        (12345, -6789),
        (-42, -42),
    ];

    #[test]
    fn test_constant_zero() {
        // zx=1 zy=1 f=1: 0 + 0 = 0 regardless of the operands.
        for (x, y) in SAMPLES {
            let r = alu(&Word::from_i16(x), &Word::from_i16(y), ctl(1, 0, 1, 0, 1, 0));
            assert!(r.out.is_zero());
            assert_eq!(r.zr, Bit::I);
            assert_eq!(r.ng, Bit::O);
        }
    }

    #[test]
    fn test_constant_minus_one() {
        // All six bits set: !( !0 + !0 ) = -1 regardless of the operands.
        for (x, y) in SAMPLES {
            let r = alu(&Word::from_i16(x), &Word::from_i16(y), ctl(1, 1, 1, 1, 1, 1));
            assert_eq!(r.out, Word::ones());
            assert_eq!(r.ng, Bit::I);
        }
    }

    #[test]
    fn test_function_table() {
        // Every documented function, checked against integer arithmetic.
        let rows: [((u8, u8, u8, u8, u8, u8), fn(i16, i16) -> i16); 18] = [
            ((1, 0, 1, 0, 1, 0), |_, _| 0),
            ((1, 1, 1, 1, 1, 1), |_, _| 1),
            ((1, 1, 1, 0, 1, 0), |_, _| -1),
            ((0, 0, 1, 1, 0, 0), |x, _| x),
            ((1, 1, 0, 0, 0, 0), |_, y| y),
            ((0, 0, 1, 1, 0, 1), |x, _| !x),
            ((1, 1, 0, 0, 0, 1), |_, y| !y),
            ((0, 0, 1, 1, 1, 1), |x, _| x.wrapping_neg()),
            ((1, 1, 0, 0, 1, 1), |_, y| y.wrapping_neg()),
            ((0, 1, 1, 1, 1, 1), |x, _| x.wrapping_add(1)),
            ((1, 1, 0, 1, 1, 1), |_, y| y.wrapping_add(1)),
            ((0, 0, 1, 1, 1, 0), |x, _| x.wrapping_sub(1)),
            ((1, 1, 0, 0, 1, 0), |_, y| y.wrapping_sub(1)),
            ((0, 0, 0, 0, 1, 0), |x, y| x.wrapping_add(y)),
            ((0, 1, 0, 0, 1, 1), |x, y| x.wrapping_sub(y)),
            ((0, 0, 0, 1, 1, 1), |x, y| y.wrapping_sub(x)),
            ((0, 0, 0, 0, 0, 0), |x, y| x & y),
            ((0, 1, 0, 1, 0, 1), |x, y| x | y),
        ];

        for ((zx, nx, zy, ny, f, no), expected) in rows {
            for (x, y) in SAMPLES {
                let r = alu(
                    &Word::from_i16(x),
                    &Word::from_i16(y),
                    ctl(zx, nx, zy, ny, f, no),
                );
                assert_eq!(
                    r.out.to_i16(),
                    expected(x, y),
                    "control ({},{},{},{},{},{}) with x={}, y={}",
                    zx, nx, zy, ny, f, no, x, y
                );
            }
        }
    }

    #[test]
    fn test_status_flags_all_controls() {
        // zr tracks the all-zero output and ng tracks the sign bit for
        // every one of the 64 control combinations.
        for bits in 0u8..64 {
            let control = ctl(
                (bits >> 5) & 1,
                (bits >> 4) & 1,
                (bits >> 3) & 1,
                (bits >> 2) & 1,
                (bits >> 1) & 1,
                bits & 1,
            );
            for (x, y) in SAMPLES {
                let r = alu(&Word::from_i16(x), &Word::from_i16(y), control);
                assert_eq!(r.zr, Bit::from(r.out.is_zero()));
                assert_eq!(r.ng, Bit::from(r.out.to_i16() < 0));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let x = Word::from_i16(123);
        let y = Word::from_i16(-456);
        let control = ctl(0, 1, 0, 0, 1, 1);
        assert_eq!(alu(&x, &y, control), alu(&x, &y, control));
    }
}
