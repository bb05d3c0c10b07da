//! Fault taxonomy for the FURST machine.
//!
//! Every fault is fatal: the machine transitions to `Faulted` and never
//! resumes. The driver surfaces the fault together with the instruction
//! pointer at fault time (carried in the execution state, not here).

use thiserror::Error;

/// A fatal execution fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// Address outside the memory region's bounds.
    #[error("invalid address {addr}")]
    InvalidAddress { addr: u32 },

    /// Tagged read disagreed with the cell's tag.
    #[error("type mismatch at address {addr}: expected {expected}, found {found}")]
    TypeMismatch {
        addr: u32,
        expected: &'static str,
        found: &'static str,
    },

    /// Push past the work stack's capacity.
    #[error("work stack overflow")]
    StackOverflow,

    /// Pop or peek on an under-filled work stack.
    #[error("work stack underflow")]
    StackUnderflow,

    /// Call at full recursion depth.
    #[error("call stack overflow")]
    CallStackOverflow,

    /// Return with no call frame to return to.
    #[error("call stack underflow")]
    CallStackUnderflow,

    /// `div`/`mod`/`divs`/`mods` with a zero right operand.
    #[error("division by zero")]
    DivisionByZero,

    /// Byte at the instruction pointer has no handler.
    #[error("unknown opcode {opcode:#04x}")]
    UnknownOpcode { opcode: u8 },

    /// Opcode byte is reserved and must not be executed.
    #[error("reserved opcode {opcode:#04x}")]
    ReservedOpcode { opcode: u8 },

    /// Inspection type code names no inspectable type.
    #[error("invalid type code {code:#04x}")]
    InvalidTypeCode { code: u8 },

    /// `loop` executed while another loop context is still active.
    #[error("loop overlaps an active loop context")]
    LoopOverlap,

    /// `lcont`/`lbrk` executed with no active loop context.
    #[error("no active loop context")]
    NoActiveLoop,

    /// Program image does not fit in main memory.
    #[error("image of {len} bytes exceeds memory capacity")]
    ImageTooLarge { len: usize },

    /// Program image is too short to hold the bootstrap pointer.
    #[error("image of {len} bytes is truncated")]
    TruncatedImage { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_formats() {
        assert_eq!(
            Fault::InvalidAddress { addr: 512 }.to_string(),
            "invalid address 512"
        );
        assert_eq!(
            Fault::TypeMismatch {
                addr: 8,
                expected: "uint32",
                found: "int32 head",
            }
            .to_string(),
            "type mismatch at address 8: expected uint32, found int32 head"
        );
        assert_eq!(Fault::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Fault::UnknownOpcode { opcode: 0x3D }.to_string(),
            "unknown opcode 0x3d"
        );
        assert_eq!(
            Fault::ReservedOpcode { opcode: 7 }.to_string(),
            "reserved opcode 0x07"
        );
    }
}
