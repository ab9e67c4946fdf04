//! Instruction decoding.
//!
//! An instruction is a plain [`Word`] interpreted positionally:
//!
//! ```text
//! bit  0      A-instruction (0) vs C-instruction (1)
//! bit  3      ALU y operand: A register (0) vs data memory (1)
//! bits 4-9    ALU control: zx, nx, zy, ny, f, no
//! bits 10-12  destination writes: A, D, memory
//! bits 13-15  jump conditions: negative, zero, positive
//! ```
//!
//! This layout is the wire protocol between decode and execution and
//! must match exactly. Extraction is uniform for every word: an
//! A-instruction's value bits still land on the same control lines,
//! and the CPU's gating decides what they drive.

use crate::logic::{AluControl, Bit, Word};
use serde::{Deserialize, Serialize};

/// The control lines decoded from one instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignals {
    /// Bit 0: this is a C-instruction.
    pub is_c: Bit,
    /// Bit 3: the ALU's y operand comes from data memory instead of
    /// the A register.
    pub use_m: Bit,
    /// Bits 4-9: the six ALU control bits.
    pub alu: AluControl,
    /// Bit 10: write the ALU output to the A register.
    pub dest_a: Bit,
    /// Bit 11: write the ALU output to the D register.
    pub dest_d: Bit,
    /// Bit 12: write the ALU output to data memory.
    pub dest_m: Bit,
    /// Bit 13: jump if the ALU output is negative.
    pub jump_neg: Bit,
    /// Bit 14: jump if the ALU output is zero.
    pub jump_zero: Bit,
    /// Bit 15: jump if the ALU output is non-negative.
    pub jump_pos: Bit,
}

impl ControlSignals {
    /// Extract the control lines from an instruction word.
    ///
    /// Infallible: every 16-bit pattern is an instruction.
    pub fn from_word(instruction: &Word) -> Self {
        Self {
            is_c: instruction.get(0),
            use_m: instruction.get(3),
            alu: AluControl {
                zx: instruction.get(4),
                nx: instruction.get(5),
                zy: instruction.get(6),
                ny: instruction.get(7),
                f: instruction.get(8),
                no: instruction.get(9),
            },
            dest_a: instruction.get(10),
            dest_d: instruction.get(11),
            dest_m: instruction.get(12),
            jump_neg: instruction.get(13),
            jump_zero: instruction.get(14),
            jump_pos: instruction.get(15),
        }
    }

    /// True when bit 0 is clear: the word is a value to load into A.
    pub fn is_a_instruction(&self) -> bool {
        self.is_c.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_instruction() {
        // @17: plain value, sign bit clear.
        let signals = ControlSignals::from_word(&Word::from_i16(17));
        assert!(signals.is_a_instruction());
        assert_eq!(signals.is_c, Bit::O);
    }

    #[test]
    fn test_c_instruction_fields() {
        // 111 a cccccc ddd jjj = 111 0 110111 010 000 (D=A+1)
        let word = Word::parse("1110110111010000").unwrap();
        let signals = ControlSignals::from_word(&word);

        assert_eq!(signals.is_c, Bit::I);
        assert_eq!(signals.use_m, Bit::O);
        assert_eq!(
            signals.alu,
            AluControl {
                zx: Bit::I,
                nx: Bit::I,
                zy: Bit::O,
                ny: Bit::I,
                f: Bit::I,
                no: Bit::I,
            }
        );
        assert_eq!(signals.dest_a, Bit::O);
        assert_eq!(signals.dest_d, Bit::I);
        assert_eq!(signals.dest_m, Bit::O);
        assert_eq!(signals.jump_neg, Bit::O);
        assert_eq!(signals.jump_zero, Bit::O);
        assert_eq!(signals.jump_pos, Bit::O);
    }

    #[test]
    fn test_jump_bits() {
        // 0;JMP: all three jump flags set.
        let word = Word::parse("1110101010000111").unwrap();
        let signals = ControlSignals::from_word(&word);

        assert_eq!(signals.jump_neg, Bit::I);
        assert_eq!(signals.jump_zero, Bit::I);
        assert_eq!(signals.jump_pos, Bit::I);
        assert_eq!(signals.dest_a, Bit::O);
        assert_eq!(signals.dest_d, Bit::O);
        assert_eq!(signals.dest_m, Bit::O);
    }

    #[test]
    fn test_extraction_is_uniform() {
        // An A-value with bit 12 set still reports dest_m: the decode
        // stage never looks at the instruction kind.
        let word = Word::parse("0000000000001000").unwrap();
        let signals = ControlSignals::from_word(&word);
        assert!(signals.is_a_instruction());
        assert_eq!(signals.dest_m, Bit::I);
    }
}
