//! Decode errors for FURST instruction bytes.

use thiserror::Error;

/// Errors that occur while decoding opcode or type-code bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte value has no opcode assigned (valid opcodes are 0..=60).
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    /// Type code is reserved (0, 3, 4) and carries no inspectable type.
    #[error("reserved type code: {0:#04x}")]
    ReservedTypeCode(u8),

    /// Type code is outside the defined range entirely.
    #[error("unknown type code: {0:#04x}")]
    UnknownTypeCode(u8),
}
