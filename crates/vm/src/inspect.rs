//! Inspection records emitted by `nspctr`/`nspctst`.
//!
//! The engine buffers these; rendering is the driver's business. The
//! `Display` impl is a convenience for drivers that want the classic
//! textual form.

use std::fmt;

use furst_common::TypedValue;

/// Where an inspected value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectLocation {
    /// Main memory, absolute address.
    Ram(u32),
    /// Work stack, byte offset below the top-of-stack cursor.
    Stack(u32),
}

/// One inspection: location, type, value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inspection {
    pub location: InspectLocation,
    pub value: TypedValue,
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.value.type_code().name();
        match self.location {
            InspectLocation::Ram(addr) => {
                write!(f, "ram[{addr}] ({type_name}) = {}", self.value)
            }
            InspectLocation::Stack(offset) => {
                write!(f, "wstk[{offset}] ({type_name}) = {}", self.value)
            }
        }
    }
}
