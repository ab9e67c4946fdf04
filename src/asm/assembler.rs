//! Two-pass assembler for Hack programs.
//!
//! Syntax:
//! ```text
//! // Comment
//! @21          // A-instruction: load a constant
//! @counter     // A-instruction: symbol (predefined, label or variable)
//! (LOOP)       // Define a label at the next instruction address
//! D=M          // C-instruction: dest=comp
//! D;JGT        // C-instruction: comp;jump
//! MD=D+1;JEQ   // C-instruction: all three parts
//! ```
//!
//! Pass 1 records label addresses; pass 2 encodes instructions,
//! allocating fresh variables from address 16 upward.

use crate::logic::{Bit, Word};
use std::collections::HashMap;
use thiserror::Error;

/// First address handed out to user-defined variables.
const VARIABLE_BASE: i16 = 16;

/// Assemble source code to a list of machine words.
pub fn assemble(source: &str) -> Result<Vec<Word>, AssemblerError> {
    let mut asm = Assembler::new();
    asm.assemble(source)
}

/// The assembler state.
struct Assembler {
    /// Symbol table (predefined symbols, labels, variables).
    symbols: HashMap<String, i16>,
    /// Next free variable address.
    next_variable: i16,
    /// Output instructions.
    output: Vec<Word>,
}

impl Assembler {
    fn new() -> Self {
        let mut symbols = HashMap::new();

        for r in 0..16 {
            symbols.insert(format!("R{}", r), r);
        }
        symbols.insert("SP".to_string(), 0);
        symbols.insert("LCL".to_string(), 1);
        symbols.insert("ARG".to_string(), 2);
        symbols.insert("THIS".to_string(), 3);
        symbols.insert("THAT".to_string(), 4);
        symbols.insert("SCREEN".to_string(), 16384);
        symbols.insert("KBD".to_string(), 24576);

        Self {
            symbols,
            next_variable: VARIABLE_BASE,
            output: Vec::new(),
        }
    }

    fn assemble(&mut self, source: &str) -> Result<Vec<Word>, AssemblerError> {
        // Pass 1: collect label addresses.
        let mut address = 0i16;
        for (line_num, raw) in source.lines().enumerate() {
            let Some(line) = clean(raw) else { continue };

            if let Some(label) = parse_label(line, line_num + 1)? {
                if self.symbols.insert(label.to_string(), address).is_some() {
                    return Err(AssemblerError::DuplicateLabel {
                        line: line_num + 1,
                        label: label.to_string(),
                    });
                }
            } else {
                address += 1;
            }
        }

        // Pass 2: encode, allocating variables on first reference.
        for (line_num, raw) in source.lines().enumerate() {
            let Some(line) = clean(raw) else { continue };

            if parse_label(line, line_num + 1)?.is_some() {
                continue;
            }

            let word = if let Some(operand) = line.strip_prefix('@') {
                self.encode_a_instruction(operand, line_num + 1)?
            } else {
                encode_c_instruction(line, line_num + 1)?
            };
            self.output.push(word);
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn encode_a_instruction(&mut self, operand: &str, line: usize) -> Result<Word, AssemblerError> {
        let operand = operand.trim();
        if operand.is_empty() {
            return Err(AssemblerError::SyntaxError {
                line,
                message: "@ requires a value or symbol".into(),
            });
        }

        if operand.chars().all(|c| c.is_ascii_digit()) {
            // A-constants must leave the sign bit clear: only 15 bits
            // are available below the instruction-select position.
            let value: i16 = operand
                .parse()
                .map_err(|_| AssemblerError::ValueOutOfRange {
                    line,
                    value: operand.to_string(),
                })?;
            return Ok(Word::from_i16(value));
        }

        // Symbols may not start with a digit, so anything else
        // digit-initial (or sign-prefixed) is a malformed constant.
        if !operand
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$' | ':'))
        {
            return Err(AssemblerError::SyntaxError {
                line,
                message: format!("invalid symbol '{}'", operand),
            });
        }

        let value = match self.symbols.get(operand) {
            Some(&addr) => addr,
            None => {
                let addr = self.next_variable;
                self.next_variable += 1;
                self.symbols.insert(operand.to_string(), addr);
                addr
            }
        };
        Ok(Word::from_i16(value))
    }
}

/// Strip comments and whitespace; `None` if nothing is left.
fn clean(raw: &str) -> Option<&str> {
    let line = match raw.find("//") {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Parse a `(LABEL)` definition, if the line is one.
fn parse_label(line: &str, line_num: usize) -> Result<Option<&str>, AssemblerError> {
    if !line.starts_with('(') {
        return Ok(None);
    }

    let label = line
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AssemblerError::SyntaxError {
            line: line_num,
            message: "malformed label definition".into(),
        })?;

    Ok(Some(label))
}

/// Encode a `dest=comp;jump` line into a machine word.
fn encode_c_instruction(line: &str, line_num: usize) -> Result<Word, AssemblerError> {
    let (dest, rest) = match line.split_once('=') {
        Some((dest, rest)) => (dest.trim(), rest),
        None => ("", line),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp.trim(), jump.trim()),
        None => (rest.trim(), ""),
    };

    let comp_field = comp_bits(comp).ok_or_else(|| AssemblerError::UnknownComp {
        line: line_num,
        comp: comp.to_string(),
    })?;
    let dest_field = dest_bits(dest).ok_or_else(|| AssemblerError::UnknownDest {
        line: line_num,
        dest: dest.to_string(),
    })?;
    let jump_field = jump_bits(jump).ok_or_else(|| AssemblerError::UnknownJump {
        line: line_num,
        jump: jump.to_string(),
    })?;

    // 111 a cccccc ddd jjj, MSB first.
    let mut bits = [Bit::I; 16];
    for (i, c) in comp_field.chars().enumerate() {
        bits[3 + i] = Bit::from(c == '1');
    }
    for (i, c) in dest_field.chars().enumerate() {
        bits[10 + i] = Bit::from(c == '1');
    }
    for (i, c) in jump_field.chars().enumerate() {
        bits[13 + i] = Bit::from(c == '1');
    }

    Ok(Word::from_bits(bits))
}

/// The computation field: `a` bit plus the six ALU control bits.
fn comp_bits(comp: &str) -> Option<&'static str> {
    Some(match comp {
        "0" => "0101010",
        "1" => "0111111",
        "-1" => "0111010",
        "D" => "0001100",
        "A" => "0110000",
        "M" => "1110000",
        "!D" => "0001101",
        "!A" => "0110001",
        "!M" => "1110001",
        "-D" => "0001111",
        "-A" => "0110011",
        "-M" => "1110011",
        "D+1" => "0011111",
        "A+1" => "0110111",
        "M+1" => "1110111",
        "D-1" => "0001110",
        "A-1" => "0110010",
        "M-1" => "1110010",
        "D+A" | "A+D" => "0000010",
        "D+M" | "M+D" => "1000010",
        "D-A" => "0010011",
        "D-M" => "1010011",
        "A-D" => "0000111",
        "M-D" => "1000111",
        "D&A" | "A&D" => "0000000",
        "D&M" | "M&D" => "1000000",
        "D|A" | "A|D" => "0010101",
        "D|M" | "M|D" => "1010101",
        _ => return None,
    })
}

/// The destination field: A, D, M write flags.
fn dest_bits(dest: &str) -> Option<&'static str> {
    Some(match dest {
        "" => "000",
        "M" => "001",
        "D" => "010",
        "MD" | "DM" => "011",
        "A" => "100",
        "AM" | "MA" => "101",
        "AD" | "DA" => "110",
        "AMD" | "ADM" | "MAD" | "MDA" | "DAM" | "DMA" => "111",
        _ => return None,
    })
}

/// The jump field: negative, zero, positive condition flags.
fn jump_bits(jump: &str) -> Option<&'static str> {
    Some(match jump {
        "" => "000",
        "JGT" => "001",
        "JEQ" => "010",
        "JGE" => "011",
        "JLT" => "100",
        "JNE" => "101",
        "JLE" => "110",
        "JMP" => "111",
        _ => return None,
    })
}

/// Errors that can occur during assembly.
#[derive(Debug, Clone, Error)]
pub enum AssemblerError {
    #[error("line {line}: syntax error: {message}")]
    SyntaxError { line: usize, message: String },

    #[error("line {line}: unknown computation '{comp}'")]
    UnknownComp { line: usize, comp: String },

    #[error("line {line}: unknown destination '{dest}'")]
    UnknownDest { line: usize, dest: String },

    #[error("line {line}: unknown jump '{jump}'")]
    UnknownJump { line: usize, jump: String },

    #[error("line {line}: value '{value}' out of range for an A-instruction")]
    ValueOutOfRange { line: usize, value: String },

    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },
}
