//! Error types for the FURST assembler and disassembler.

use thiserror::Error;

/// Errors produced during assembly of text to a binary image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    /// An unrecognized inspection type code was encountered.
    #[error("line {line}: unknown type code '{token}'")]
    UnknownTypeCode { line: usize, token: String },

    /// An opcode did not have enough operands.
    #[error("line {line}: {mnemonic} expects {expected} operand(s)")]
    MissingOperand {
        line: usize,
        mnemonic: &'static str,
        expected: usize,
    },

    /// More operands than the opcode consumes.
    #[error("line {line}: unexpected extra operand '{token}'")]
    ExtraOperand { line: usize, token: String },

    /// A numeric literal could not be parsed.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A numeric literal does not fit a 32-bit word.
    #[error("line {line}: operand {value} out of 32-bit range")]
    OperandRange { line: usize, value: i64 },

    /// The same label was defined twice.
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },

    /// A referenced label was never defined.
    #[error("line {line}: unknown label '{label}'")]
    UnknownLabel { line: usize, label: String },

    /// No `main` label: the entry point is undefined.
    #[error("missing 'main' label")]
    MissingMain,

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}

/// Errors produced while disassembling a binary image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisasmError {
    /// Image too short to hold the bootstrap pointer.
    #[error("image of {len} bytes is truncated")]
    TruncatedImage { len: usize },

    /// Byte at `addr` is not an opcode.
    #[error("unknown opcode {byte:#04x} at address {addr}")]
    UnknownOpcode { addr: u32, byte: u8 },

    /// Instruction at `addr` runs past the end of the image.
    #[error("truncated instruction at address {addr}")]
    TruncatedInstruction { addr: u32 },

    /// Inspection type code byte at `addr` is invalid.
    #[error("invalid type code {byte:#04x} at address {addr}")]
    InvalidTypeCode { addr: u32, byte: u8 },
}
