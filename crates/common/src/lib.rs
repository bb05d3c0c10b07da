//! FURST common types and image encoding.
//!
//! This crate provides the foundational data structures shared by the
//! virtual machine, the assembler, and the CLI:
//!
//! - [`Opcode`] — the 61-entry opcode catalogue with encoding metadata
//! - [`TypeCode`] — inspection type codes
//! - [`TypedValue`] — the typed value unit moved through memory and stack
//! - [`ImageBuilder`] — raw program-image construction
//! - [`DecodeError`] — errors from decoding opcode/type-code bytes
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod image;
pub mod opcode;
pub mod type_code;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use image::{ImageBuilder, BOOT_PTR_ADDR, WORD_SIZE};
pub use opcode::{Opcode, Operand, ALL_OPCODES};
pub use type_code::{TypeCode, ALL_TYPE_CODES};
pub use value::TypedValue;
