//! The central processing unit.
//!
//! Wires the two registers, the ALU, the program counter and two
//! multiplexers together per the fixed instruction format. The
//! evaluation order inside one cycle is part of the contract
//! (mux → A register → mux → D register → ALU → jump → program
//! counter): registers expose the previous cycle's value until their
//! own turn, so both the A-input mux and the D register consume the
//! ALU output of the *previous* cycle.

use crate::logic::{alu, gates, Bit, Word};
use crate::machine::decode::ControlSignals;
use crate::machine::register::{ProgramCounter, Register};
use serde::{Deserialize, Serialize};

/// Everything the CPU drives outward at the end of a cycle, for the
/// driver to apply to the data store and the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuOutput {
    /// Value to write to data memory.
    pub out_m: Word,
    /// Whether to write to data memory.
    pub write_m: Bit,
    /// Data-memory address (the A register's output).
    pub address_m: Word,
    /// Address of the next instruction.
    pub pc: Word,
}

/// The CPU: A and D registers, ALU, program counter and the muxes
/// routing between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    reg_a: Register,
    reg_d: Register,
    pc: ProgramCounter,
    /// The ALU output latched at the end of the previous cycle; it is
    /// what the A-input mux and the D register see this cycle.
    alu_out: Word,
}

impl Cpu {
    /// Create a CPU with zeroed registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one cycle.
    ///
    /// `instruction` is the word fetched at the current program
    /// counter, `in_m` the data store's current output. The returned
    /// [`CpuOutput`] carries the memory write lines and the next fetch
    /// address.
    pub fn process(&mut self, instruction: Word, in_m: Word, reset: Bit) -> CpuOutput {
        let signals = ControlSignals::from_word(&instruction);
        let is_a = signals.is_c.not();

        // A register input: the instruction itself for an A-instruction,
        // otherwise the previous cycle's ALU output.
        let a_input = gates::mux(&instruction, &self.alu_out, signals.is_c);

        // An A-instruction always writes A; a C-instruction only on its
        // destination flag.
        let write_a = signals.dest_a.or(is_a);
        let a_out = self.reg_a.process(a_input, write_a);

        // ALU y operand: A register or data memory.
        let y = gates::mux(&a_out, &in_m, signals.use_m);

        // The D register gates on the same is-A fallback as A, so a
        // plain A-instruction latches the previous ALU output into D.
        let write_d = signals.dest_d.or(is_a);
        let d_out = self.reg_d.process(self.alu_out, write_d);

        let alu_result = alu::alu(&d_out, &y, signals.alu);
        self.alu_out = alu_result.out;

        // Jump: each condition gated by its own flag and by this being
        // a C-instruction, then OR'd.
        let jump_neg = signals.jump_neg.and(alu_result.ng);
        let jump_zero = signals.jump_zero.and(alu_result.zr);
        let jump_pos = signals.jump_pos.and(alu_result.ng.not());
        let load = signals.is_c.and(jump_neg.or(jump_zero).or(jump_pos));

        let pc = self.pc.process(a_out, load, reset);

        CpuOutput {
            out_m: alu_result.out,
            write_m: signals.dest_m,
            address_m: a_out,
            pc,
        }
    }

    /// The A register's current output.
    pub fn a(&self) -> Word {
        self.reg_a.out()
    }

    /// The D register's current output.
    pub fn d(&self) -> Word {
        self.reg_d.out()
    }

    /// The program counter's current output — the next fetch address.
    pub fn pc(&self) -> Word {
        self.pc.out()
    }
}
