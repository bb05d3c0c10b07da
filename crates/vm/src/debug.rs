//! Debug/step surface: run-until-break plus side-effect-free reads.
//!
//! A thin mode over the same interpreter: `step()` and `run()` live in
//! the execute module; this one adds the breakpoint-aware driver and the
//! typed reads an external debugger needs between steps.

use furst_common::{TypeCode, TypedValue};

use crate::error::Fault;
use crate::machine::{ExecutionState, Machine};

impl Machine {
    /// Steps until the machine halts, faults, or has just executed a
    /// `brkp` — in which case it returns `Running` with the pointer
    /// resting before the instruction that follows the breakpoint.
    pub fn resume(&mut self) -> ExecutionState {
        loop {
            let state = self.step();
            if state.is_terminal() || self.break_hit {
                return state;
            }
        }
    }

    /// True immediately after a step that executed `brkp`.
    pub fn breakpoint_hit(&self) -> bool {
        self.break_hit
    }

    /// Tag-checked read of main memory as the coded type. Read-only: the
    /// machine state is untouched, faults are returned, not entered.
    pub fn read_memory(&self, addr: u32, code: TypeCode) -> Result<TypedValue, Fault> {
        match code {
            TypeCode::Uint32 => Ok(TypedValue::Uint32(self.ram.read_uint(addr)?)),
            TypeCode::Int32 => Ok(TypedValue::Int32(self.ram.read_int(addr)?)),
            TypeCode::Uint8 => Ok(TypedValue::Uint8(self.ram.read_byte(addr)?)),
        }
    }

    /// Tag-checked read of the work stack at a byte offset below the top.
    pub fn read_stack(&self, offset: u32, code: TypeCode) -> Result<TypedValue, Fault> {
        self.wstk.read_at_offset(offset, code)
    }
}
