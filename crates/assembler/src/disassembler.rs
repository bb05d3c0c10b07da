//! Disassembler: binary image -> canonical assembly text.
//!
//! Output is flat text, one instruction per line, decimal operands, with
//! `main:` emitted at the entry address. For images laid out the way the
//! assembler lays them out (contiguous code from address 4),
//! `assemble(disassemble(image)) == image`.

use furst_common::{Opcode, Operand, TypeCode, WORD_SIZE};

use crate::error::DisasmError;

/// Disassemble a binary image into canonical assembly text.
pub fn disassemble(image: &[u8]) -> Result<String, DisasmError> {
    if image.len() < WORD_SIZE as usize {
        return Err(DisasmError::TruncatedImage { len: image.len() });
    }
    let entry = u32::from_le_bytes([image[0], image[1], image[2], image[3]]);

    let mut out = String::new();
    let mut addr = WORD_SIZE;

    while (addr as usize) < image.len() {
        if addr == entry {
            out.push_str("main:\n");
        }

        let byte = image[addr as usize];
        let opcode =
            Opcode::try_from(byte).map_err(|_| DisasmError::UnknownOpcode { addr, byte })?;
        if addr as u64 + opcode.width() as u64 > image.len() as u64 {
            return Err(DisasmError::TruncatedInstruction { addr });
        }

        out.push_str(opcode.mnemonic());
        let mut at = addr as usize + 1;
        for operand in opcode.operands() {
            match operand {
                Operand::Word => {
                    let raw: [u8; 4] = image[at..at + 4].try_into().expect("width checked");
                    out.push(' ');
                    out.push_str(&u32::from_le_bytes(raw).to_string());
                    at += 4;
                }
                Operand::TypeCode => {
                    let code = image[at];
                    let tc = TypeCode::try_from(code).map_err(|_| {
                        DisasmError::InvalidTypeCode {
                            addr: at as u32,
                            byte: code,
                        }
                    })?;
                    out.push(' ');
                    out.push_str(tc.name());
                    at += 1;
                }
            }
        }
        out.push('\n');
        addr += opcode.width();
    }

    Ok(out)
}
