//! Disassembler for Hack programs.
//!
//! Converts machine words back to readable assembly.

use crate::logic::Word;
use crate::machine::ControlSignals;

/// Disassemble a single machine word to text.
pub fn disassemble_word(word: Word) -> String {
    let signals = ControlSignals::from_word(&word);

    if signals.is_a_instruction() {
        return format!("@{}", word.to_u16());
    }

    let comp = match comp_mnemonic(&word) {
        Some(comp) => comp,
        None => return format!("??? // {}", word),
    };

    let dest = dest_mnemonic(&word);
    let jump = jump_mnemonic(&word);

    let mut line = String::new();
    if !dest.is_empty() {
        line.push_str(dest);
        line.push('=');
    }
    line.push_str(comp);
    if !jump.is_empty() {
        line.push(';');
        line.push_str(jump);
    }
    line
}

/// Disassemble a slice of machine words to a listing.
pub fn disassemble(words: &[Word]) -> String {
    let mut output = String::new();

    for (addr, word) in words.iter().enumerate() {
        output.push_str(&format!("{:04}: {}  // {}\n", addr, disassemble_word(*word), word));
    }

    output
}

/// Look up the comp mnemonic for the instruction's a+cccccc field.
fn comp_mnemonic(word: &Word) -> Option<&'static str> {
    let field: String = (3..10).map(|i| char::from(b'0' + word.get(i).to_u8())).collect();

    Some(match field.as_str() {
        "0101010" => "0",
        "0111111" => "1",
        "0111010" => "-1",
        "0001100" => "D",
        "0110000" => "A",
        "1110000" => "M",
        "0001101" => "!D",
        "0110001" => "!A",
        "1110001" => "!M",
        "0001111" => "-D",
        "0110011" => "-A",
        "1110011" => "-M",
        "0011111" => "D+1",
        "0110111" => "A+1",
        "1110111" => "M+1",
        "0001110" => "D-1",
        "0110010" => "A-1",
        "1110010" => "M-1",
        "0000010" => "D+A",
        "1000010" => "D+M",
        "0010011" => "D-A",
        "1010011" => "D-M",
        "0000111" => "A-D",
        "1000111" => "M-D",
        "0000000" => "D&A",
        "1000000" => "D&M",
        "0010101" => "D|A",
        "1010101" => "D|M",
        _ => return None,
    })
}

fn dest_mnemonic(word: &Word) -> &'static str {
    match (word.get(10).to_u8(), word.get(11).to_u8(), word.get(12).to_u8()) {
        (0, 0, 0) => "",
        (0, 0, 1) => "M",
        (0, 1, 0) => "D",
        (0, 1, 1) => "MD",
        (1, 0, 0) => "A",
        (1, 0, 1) => "AM",
        (1, 1, 0) => "AD",
        (1, 1, 1) => "AMD",
        _ => unreachable!(),
    }
}

fn jump_mnemonic(word: &Word) -> &'static str {
    match (word.get(13).to_u8(), word.get(14).to_u8(), word.get(15).to_u8()) {
        (0, 0, 0) => "",
        (0, 0, 1) => "JGT",
        (0, 1, 0) => "JEQ",
        (0, 1, 1) => "JGE",
        (1, 0, 0) => "JLT",
        (1, 0, 1) => "JNE",
        (1, 1, 0) => "JLE",
        (1, 1, 1) => "JMP",
        _ => unreachable!(),
    }
}
