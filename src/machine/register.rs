//! Clocked storage elements.
//!
//! A [`Register`] models an edge-triggered 16-bit latch: the value it
//! exposes on any cycle is the one captured on the *previous* cycle.
//! The [`ProgramCounter`] is a register with synchronous reset,
//! conditional load (jump) and a default increment.

use crate::logic::{gates, Bit, Word};
use serde::{Deserialize, Serialize};

/// An edge-triggered single-word register.
///
/// One cycle of latency is part of the contract, not an implementation
/// detail: `process` first exposes the previously latched value, then —
/// if `write` is asserted — captures the input as the value for the
/// *next* cycle. Callers that need the current output without clocking
/// the register can probe [`Register::out`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Register {
    next: Word,
    out: Word,
}

impl Register {
    /// Create a register with all-zero output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one clock cycle.
    ///
    /// Returns the value latched on the previous cycle; when `write` is
    /// set, `input` becomes the value returned by the following cycle.
    pub fn process(&mut self, input: Word, write: Bit) -> Word {
        self.out = self.next;
        if write.is_set() {
            self.next = input;
        }
        self.out
    }

    /// The current output, without advancing the clock.
    pub fn out(&self) -> Word {
        self.out
    }
}

/// The program counter.
///
/// Unlike [`Register`], its `process` computes the *next* fetch address
/// in place: reset forces it to zero immediately, load replaces it with
/// the jump target, and otherwise it increments by one through the
/// ripple-carry adder.
///
/// Precedence: reset > load > increment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramCounter {
    out: Word,
}

impl ProgramCounter {
    /// Create a program counter at address zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one clock cycle and return the new output.
    ///
    /// Reset takes effect on this very call — the returned word is
    /// all-zero, overriding any pending load or increment.
    pub fn process(&mut self, input: Word, load: Bit, reset: Bit) -> Word {
        if reset.is_set() {
            self.out = Word::zero();
            return self.out;
        }

        if load.is_set() {
            self.out = input;
            return self.out;
        }

        self.out = gates::adder(&self.out, &Word::one());
        self.out
    }

    /// The current output, without advancing the clock.
    pub fn out(&self) -> Word {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_one_cycle_latency() {
        let mut reg = Register::new();

        // The write is captured, but the output on that same call is
        // still the previously latched value.
        let out = reg.process(Word::from_i16(42), Bit::I);
        assert!(out.is_zero());

        // The captured value appears on the next cycle.
        let out = reg.process(Word::zero(), Bit::O);
        assert_eq!(out.to_i16(), 42);

        // And holds with write deasserted.
        let out = reg.process(Word::from_i16(7), Bit::O);
        assert_eq!(out.to_i16(), 42);
    }

    #[test]
    fn test_register_ignores_input_without_write() {
        let mut reg = Register::new();
        reg.process(Word::from_i16(99), Bit::O);
        let out = reg.process(Word::zero(), Bit::O);
        assert!(out.is_zero());
    }

    #[test]
    fn test_pc_increments() {
        let mut pc = ProgramCounter::new();
        assert_eq!(pc.process(Word::zero(), Bit::O, Bit::O).to_i16(), 1);
        assert_eq!(pc.process(Word::zero(), Bit::O, Bit::O).to_i16(), 2);
        assert_eq!(pc.process(Word::zero(), Bit::O, Bit::O).to_i16(), 3);
    }

    #[test]
    fn test_pc_load() {
        let mut pc = ProgramCounter::new();
        let out = pc.process(Word::from_i16(100), Bit::I, Bit::O);
        assert_eq!(out.to_i16(), 100);

        // Increment resumes from the loaded address.
        assert_eq!(pc.process(Word::zero(), Bit::O, Bit::O).to_i16(), 101);
    }

    #[test]
    fn test_pc_reset_is_immediate() {
        let mut pc = ProgramCounter::new();
        pc.process(Word::from_i16(100), Bit::I, Bit::O);

        // Reset yields zero on the same call, overriding a pending load.
        let out = pc.process(Word::from_i16(55), Bit::I, Bit::I);
        assert!(out.is_zero());
        assert!(pc.out().is_zero());
    }

    #[test]
    fn test_pc_reset_overrides_increment() {
        let mut pc = ProgramCounter::new();
        pc.process(Word::zero(), Bit::O, Bit::O);
        pc.process(Word::zero(), Bit::O, Bit::O);

        let out = pc.process(Word::zero(), Bit::O, Bit::I);
        assert!(out.is_zero());
    }
}
