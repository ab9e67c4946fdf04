//! The assembled machine and its execution driver.
//!
//! A [`Computer`] owns the instruction store, the data store and the
//! CPU, and runs the fetch-decode-execute loop: present the program
//! counter to the ROM, feed the fetched instruction and the RAM's
//! current output into the CPU, step it, then apply the CPU's write
//! lines back to the RAM. There is no halt instruction — the machine
//! stops when the program counter walks off the end of the loaded
//! program.

use crate::logic::{Bit, Word};
use crate::machine::cpu::{Cpu, CpuOutput};
use crate::machine::memory::{Ram, Rom};
use serde::{Deserialize, Serialize};

/// Execution state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Instructions remain at the program counter.
    Running,
    /// The last fetch found no instruction — the program is exhausted.
    Halted,
}

/// The complete machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Computer {
    /// Instruction store.
    pub rom: Rom,
    /// Data store.
    pub ram: Ram,
    /// The processor.
    pub cpu: Cpu,
    state: RunState,
    cycles: u64,
}

impl Computer {
    /// Create a machine with empty memories and a zeroed CPU.
    pub fn new() -> Self {
        Self {
            rom: Rom::new(),
            ram: Ram::new(),
            cpu: Cpu::new(),
            state: RunState::Running,
            cycles: 0,
        }
    }

    /// Load a program into the instruction store at addresses 0,1,2,…
    pub fn load_program(&mut self, program: &[Word]) {
        let mut address = Word::zero();
        for &instruction in program {
            self.rom.set(address, instruction);
            address = crate::logic::gates::adder(&address, &Word::one());
        }
    }

    /// Seed a data-store cell before the run starts.
    ///
    /// Issues the same clocked write a running program would, so the
    /// RAM's output register reflects the seeded value.
    pub fn seed_ram(&mut self, address: Word, value: Word) {
        let _ = self.ram.process(address, value, Bit::I);
    }

    /// Execute one clock cycle.
    ///
    /// Returns the CPU outputs of the cycle, or `None` once the fetch
    /// comes up empty — the clean-halt signal, not an error.
    pub fn step(&mut self) -> Option<CpuOutput> {
        if self.state == RunState::Halted {
            return None;
        }

        let Some(instruction) = self.rom.fetch(self.cpu.pc()) else {
            self.state = RunState::Halted;
            return None;
        };

        // The CPU sees the RAM output of the previous cycle; the write
        // lines it produces are applied afterwards.
        let in_m = self.ram.out();
        let output = self.cpu.process(instruction, in_m, Bit::O);
        let _ = self.ram.process(output.address_m, output.out_m, output.write_m);

        self.cycles += 1;
        Some(output)
    }

    /// Run until the program is exhausted.
    ///
    /// Returns the number of cycles executed. A program that never
    /// walks off the end of the ROM never returns; use [`Self::run_for`]
    /// when that is a possibility.
    pub fn run(&mut self) -> u64 {
        let start = self.cycles;
        while self.step().is_some() {}
        self.cycles - start
    }

    /// Run for at most `max_cycles` cycles.
    ///
    /// Returns the number of cycles actually executed, which is lower
    /// than `max_cycles` only if the machine halted.
    pub fn run_for(&mut self, max_cycles: u64) -> u64 {
        let start = self.cycles;
        let limit = self.cycles + max_cycles;

        while self.cycles < limit && self.step().is_some() {}

        self.cycles - start
    }

    /// Current execution state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Check if the machine has halted.
    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    /// Total cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl Default for Computer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode `111 a cccccc ddd jjj` from literal bit strings.
    fn c_instruction(comp: &str, dest: &str, jump: &str) -> Word {
        Word::parse(&format!("111{}{}{}", comp, dest, jump)).unwrap()
    }

    #[test]
    fn test_empty_rom_halts_immediately() {
        let mut computer = Computer::new();
        assert_eq!(computer.run(), 0);
        assert!(computer.is_halted());
    }

    #[test]
    fn test_zero_instruction_is_not_a_halt() {
        let mut computer = Computer::new();

        // A stored all-zero word executes as @0; only the absent cell
        // after it stops the machine.
        computer.load_program(&[Word::zero(), Word::zero()]);
        assert_eq!(computer.run(), 2);
        assert!(computer.is_halted());
    }

    #[test]
    fn test_add_constants_program() {
        // @2, D=A+1, @0, M=D  →  RAM[0] = 3
        let program = [
            Word::from_i16(2),
            c_instruction("0110111", "010", "000"),
            Word::from_i16(0),
            c_instruction("0001100", "001", "000"),
        ];

        let mut computer = Computer::new();
        computer.load_program(&program);
        let cycles = computer.run();

        assert_eq!(cycles, 4);
        assert_eq!(computer.ram.read(Word::zero()).to_i16(), 3);
    }

    #[test]
    fn test_memory_operand_program() {
        // Seed RAM[1] = 17, then:
        //   @1     A ← 1 (and D catches the stale ALU latch)
        //   D=A+1  D ← 2 via the following A-instruction's write
        //   @2     A ← 2
        //   MD=D+M M[2] ← D + M = 2 + 17 = 19
        // The D+M read sees RAM[1] because inM lags addressM by one
        // cycle.
        let program = [
            Word::from_i16(1),
            c_instruction("0110111", "010", "000"),
            Word::from_i16(2),
            c_instruction("1000010", "011", "000"),
        ];

        let mut computer = Computer::new();
        computer.seed_ram(Word::from_i16(1), Word::from_i16(17));
        computer.load_program(&program);
        let cycles = computer.run();

        assert_eq!(cycles, 4);
        assert!(computer.is_halted());
        assert_eq!(computer.ram.read(Word::from_i16(2)).to_i16(), 19);
    }

    #[test]
    fn test_infinite_loop_is_bounded_by_run_for() {
        // @0, 0;JMP — jumps to itself forever; only the cycle cap
        // stops it.
        let program = [
            Word::from_i16(0),
            c_instruction("0101010", "000", "111"),
        ];

        let mut computer = Computer::new();
        computer.load_program(&program);

        assert_eq!(computer.run_for(1000), 1000);
        assert!(!computer.is_halted());
    }

    #[test]
    fn test_step_after_halt_stays_halted() {
        let mut computer = Computer::new();
        computer.load_program(&[Word::zero()]);
        computer.run();

        assert!(computer.step().is_none());
        assert_eq!(computer.cycles(), 1);
    }
}
