//! Machine-code image files.
//!
//! The image format is plain text, one instruction per line as 16
//! `0`/`1` characters (MSB first). Lines starting with `//` and blank
//! lines are ignored on load, so assembler listings can be annotated
//! by hand.

use crate::logic::Word;
use std::io::{BufRead, BufReader, Write as _};
use std::path::Path;
use thiserror::Error;

/// A loaded machine-code image.
#[derive(Debug, Clone, Default)]
pub struct Image {
    /// The program instructions, in ROM order.
    pub instructions: Vec<Word>,
}

impl Image {
    /// Create an empty image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instruction.
    pub fn push(&mut self, instruction: Word) {
        self.instructions.push(instruction);
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl From<Vec<Word>> for Image {
    fn from(instructions: Vec<Word>) -> Self {
        Self { instructions }
    }
}

/// Load an image file from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Image, ImageError> {
    let file = std::fs::File::open(path.as_ref())
        .map_err(|e| ImageError::Io(e.to_string()))?;
    let reader = BufReader::new(file);

    let mut image = Image::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| ImageError::Io(e.to_string()))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        // Only the leading bit field counts; trailing annotation is
        // tolerated.
        let bit_str: String = trimmed
            .chars()
            .take_while(|c| matches!(c, '0' | '1'))
            .collect();

        let word = Word::parse(&bit_str).map_err(|e| ImageError::Parse {
            line: line_num + 1,
            message: e.to_string(),
        })?;

        image.push(word);
    }

    Ok(image)
}

/// Save an image file to disk.
pub fn save_image<P: AsRef<Path>>(path: P, image: &Image) -> Result<(), ImageError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|e| ImageError::Io(e.to_string()))?;

    for instruction in &image.instructions {
        writeln!(file, "{}", instruction).map_err(|e| ImageError::Io(e.to_string()))?;
    }

    Ok(())
}

/// Errors that can occur loading or saving image files.
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
