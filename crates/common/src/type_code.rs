//! Inspection type codes.
//!
//! A type code is a one-byte immediate selecting how `nspctr`/`nspctst`
//! interpret the addressed cell. Codes 0, 3 and 4 are reserved: they are
//! carried by the image format but name no inspectable type.

use crate::error::DecodeError;

/// Selects the type for an inspection or debugger read.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// Unsigned 32-bit word.
    Uint32 = 1,
    /// Signed 32-bit word, two's complement.
    Int32 = 2,
    /// Single unsigned byte.
    Uint8 = 5,
}

/// All valid type codes, in byte-value order.
pub const ALL_TYPE_CODES: [TypeCode; 3] = [TypeCode::Uint32, TypeCode::Int32, TypeCode::Uint8];

impl TryFrom<u8> for TypeCode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TypeCode::Uint32),
            2 => Ok(TypeCode::Int32),
            5 => Ok(TypeCode::Uint8),
            0 | 3 | 4 => Err(DecodeError::ReservedTypeCode(value)),
            _ => Err(DecodeError::UnknownTypeCode(value)),
        }
    }
}

impl TypeCode {
    /// Returns the assembly name for this type code.
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Uint32 => "uint32",
            TypeCode::Int32 => "int32",
            TypeCode::Uint8 => "uint8",
        }
    }

    /// Looks up a type code by its assembly name.
    pub fn from_name(name: &str) -> Option<TypeCode> {
        ALL_TYPE_CODES.iter().copied().find(|tc| tc.name() == name)
    }
}
