//! FURST assembler — bidirectional text <-> binary image translation.
//!
//! The assembler is a mechanical 1:1 translation with label resolution.
//! No optimization, no sugar.
//!
//! # Usage
//!
//! ```
//! use furst_asm::{assemble, disassemble};
//!
//! let text = "main:\npsh 5\npsh 3\nadd\ndie\n";
//! let image = assemble(text).unwrap();
//! let roundtripped = disassemble(&image).unwrap();
//! assert_eq!(roundtripped, text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(image)) == image` holds for every image the
//! assembler produces: code is laid out contiguously from address 4, and
//! the disassembler emits numeric operands plus a `main:` marker at the
//! entry address. Hand-built images with gaps or data regions are outside
//! the guarantee; the disassembler reports where decoding breaks down.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::{AsmError, DisasmError};

/// Assemble text into a binary program image.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Vec<u8>, AsmError> {
    parser::assemble(text)
}

/// Disassemble a binary image into canonical assembly text.
pub fn disassemble(image: &[u8]) -> Result<String, DisasmError> {
    disassembler::disassemble(image)
}
