//! Gate-level logic primitives.
//!
//! This module provides the signal types and combinational functions
//! the machine is built from:
//! - [`Bit`] - a single binary digit (0 or 1)
//! - [`Word`] - the fixed 16-bit signal bundle carried on every wire
//! - [`gates`] - not / and / adder / mux as pure word functions
//! - [`alu()`] - the 8-control-bit arithmetic-logic unit

mod bit;
mod word;
pub mod alu;
pub mod gates;

pub use alu::{alu, AluControl, AluOutput};
pub use bit::Bit;
pub use word::{ParseError, Word};
