//! Fetch-decode-execute loop and opcode handlers.
//!
//! Each step fetches the opcode byte at the instruction pointer, reads the
//! immediates that follow it, and advances the pointer by the
//! instruction's total encoded width — unless the handler sets the
//! pointer explicitly (jumps, calls, returns, loop transfers). Any fault
//! transitions the machine to `Faulted` with the instruction's address.

use furst_common::{Opcode, TypeCode, TypedValue, WORD_SIZE};

use crate::error::Fault;
use crate::inspect::{InspectLocation, Inspection};
use crate::machine::{ExecutionState, Machine};

impl Machine {
    /// Executes exactly one instruction and returns the resulting state.
    ///
    /// Step and run share identical per-instruction semantics; no opcode
    /// behaves differently between the two modes.
    pub fn step(&mut self) -> ExecutionState {
        if self.state.is_terminal() {
            return self.state.clone();
        }
        self.break_hit = false;
        let at = self.ip;
        if let Err(fault) = self.dispatch() {
            self.state = ExecutionState::Faulted { fault, at };
        }
        self.state.clone()
    }

    /// Steps until the machine halts or faults.
    pub fn run(&mut self) -> ExecutionState {
        loop {
            let state = self.step();
            if state.is_terminal() {
                return state;
            }
        }
    }

    /// The word immediate at position `index` after the opcode byte.
    fn imm_word(&self, index: u32) -> Result<u32, Fault> {
        self.ram.fetch_word(self.ip + 1 + index * WORD_SIZE)
    }

    fn dispatch(&mut self) -> Result<(), Fault> {
        let byte = self.ram.fetch_byte(self.ip)?;
        let opcode =
            Opcode::try_from(byte).map_err(|_| Fault::UnknownOpcode { opcode: byte })?;

        match opcode {
            // ---- Control ----
            Opcode::Die => {
                self.state = ExecutionState::Halted(0);
                Ok(())
            }
            Opcode::Nop => self.advance(opcode),
            Opcode::TestDie => {
                self.checkpoints += 1;
                self.advance(opcode)
            }
            Opcode::Swtch => Err(Fault::ReservedOpcode { opcode: byte }),

            // ---- Call / return ----
            Opcode::Call => {
                let target = self.imm_word(0)?;
                self.calls.push(self.ip + opcode.width())?;
                self.ip = target;
                Ok(())
            }
            Opcode::Ret => {
                self.ip = self.calls.pop()?;
                Ok(())
            }

            // ---- Jumps ----
            Opcode::Jmp => {
                self.ip = self.imm_word(0)?;
                Ok(())
            }
            Opcode::Je => self.exec_byte_compare_jump(opcode, true),
            Opcode::Jn => self.exec_byte_compare_jump(opcode, false),
            Opcode::Jl => {
                let taken = self.wstk.top_uint()? < self.wstk.second_uint()?;
                self.jump_if(opcode, taken)
            }
            Opcode::Jg => {
                let taken = self.wstk.top_uint()? > self.wstk.second_uint()?;
                self.jump_if(opcode, taken)
            }
            Opcode::Jls => {
                let taken = self.wstk.top_int()? < self.wstk.second_int()?;
                self.jump_if(opcode, taken)
            }
            Opcode::Jgs => {
                let taken = self.wstk.top_int()? > self.wstk.second_int()?;
                self.jump_if(opcode, taken)
            }

            // ---- Loop construct ----
            Opcode::Loop => {
                if self.lp.active {
                    return Err(Fault::LoopOverlap);
                }
                self.lp.counter = self.imm_word(0)?;
                self.lp.body_addr = self.imm_word(1)?;
                self.lp.end_addr = self.imm_word(2)?;
                self.lp.active = true;
                self.ip = self.lp.body_addr;
                Ok(())
            }
            Opcode::Lcont => {
                if !self.lp.active {
                    return Err(Fault::NoActiveLoop);
                }
                if self.lp.counter != 0 {
                    self.lp.counter -= 1;
                    self.ip = self.lp.body_addr;
                } else {
                    self.lp.active = false;
                    self.ip = self.lp.end_addr;
                }
                Ok(())
            }
            Opcode::Lbrk => {
                if !self.lp.active {
                    return Err(Fault::NoActiveLoop);
                }
                self.lp.active = false;
                self.ip = self.lp.end_addr;
                Ok(())
            }

            // ---- Stack shape ----
            Opcode::Psh => {
                let value = self.imm_word(0)?;
                self.wstk.push(TypedValue::Uint32(value))?;
                self.advance(opcode)
            }
            Opcode::Pop => {
                self.wstk.remove(1)?;
                self.advance(opcode)
            }
            Opcode::Pop2 => {
                self.wstk.remove(2)?;
                self.advance(opcode)
            }
            Opcode::Popn => {
                let n = self.imm_word(0)?;
                self.wstk.remove(n)?;
                self.advance(opcode)
            }

            // ---- Memory transfer ----
            Opcode::Pshfr => {
                let addr = self.imm_word(0)?;
                let value = self.ram.read_value(addr)?;
                self.wstk.push(value)?;
                self.advance(opcode)
            }
            Opcode::Poptr => {
                let addr = self.imm_word(0)?;
                let value = self.wstk.pop()?;
                self.ram.write_value(addr, value)?;
                self.advance(opcode)
            }
            Opcode::Movtr => {
                let addr = self.imm_word(0)?;
                let value = self.wstk.peek_top()?;
                self.ram.write_value(addr, value)?;
                self.advance(opcode)
            }
            Opcode::Stktr => {
                let src = self.imm_word(0)?;
                let dst = self.imm_word(1)?;
                let value = self.wstk.read_value_at(src)?;
                self.ram.write_value(dst, value)?;
                self.advance(opcode)
            }
            Opcode::Cpyr => {
                let src = self.imm_word(0)?;
                let dst = self.imm_word(1)?;
                let value = self.ram.read_value(src)?;
                self.ram.write_value(dst, value)?;
                self.advance(opcode)
            }
            Opcode::Setr => {
                let dst = self.imm_word(0)?;
                let value = self.imm_word(1)?;
                self.ram.write_uint(dst, value)?;
                self.advance(opcode)
            }
            Opcode::Pshfrr => {
                let addr = self.imm_word(0)?;
                let indirect = self.ram.read_uint(addr)?;
                let value = self.ram.read_value(indirect)?;
                self.wstk.push(value)?;
                self.advance(opcode)
            }
            Opcode::Pshfrs => {
                let addr = self.wstk.pop_uint()?;
                let indirect = self.ram.read_uint(addr)?;
                let value = self.ram.read_value(indirect)?;
                self.wstk.push(value)?;
                self.advance(opcode)
            }

            // ---- Arithmetic, unsigned ----
            Opcode::Inc => self.exec_unary_uint(opcode, |v| v.wrapping_add(1)),
            Opcode::Dec => self.exec_unary_uint(opcode, |v| v.wrapping_sub(1)),
            Opcode::Add => self.exec_binary_uint(opcode, |l, r| l.wrapping_add(r)),
            Opcode::Sub => self.exec_binary_uint(opcode, |l, r| l.wrapping_sub(r)),
            Opcode::Mul => self.exec_binary_uint(opcode, |l, r| l.wrapping_mul(r)),
            Opcode::Div => self.exec_divide_uint(opcode, |l, r| l / r),
            Opcode::Mod => self.exec_divide_uint(opcode, |l, r| l % r),

            // ---- Arithmetic, signed ----
            Opcode::Incs => self.exec_unary_int(opcode, |v| v.wrapping_add(1)),
            Opcode::Decs => self.exec_unary_int(opcode, |v| v.wrapping_sub(1)),
            Opcode::Adds => self.exec_binary_int(opcode, |l, r| l.wrapping_add(r)),
            Opcode::Subs => self.exec_binary_int(opcode, |l, r| l.wrapping_sub(r)),
            Opcode::Muls => self.exec_binary_int(opcode, |l, r| l.wrapping_mul(r)),
            Opcode::Divs => self.exec_divide_int(opcode, |l, r| l.wrapping_div(r)),
            Opcode::Mods => self.exec_divide_int(opcode, |l, r| l.wrapping_rem(r)),

            // ---- Bitwise, unsigned ----
            Opcode::And => self.exec_binary_uint(opcode, |l, r| l & r),
            Opcode::Not => self.exec_unary_uint(opcode, |v| !v),
            Opcode::Xor => self.exec_binary_uint(opcode, |l, r| l ^ r),
            Opcode::Or => self.exec_binary_uint(opcode, |l, r| l | r),
            Opcode::Lshft => self.exec_binary_uint(opcode, |l, r| l.wrapping_shl(r)),
            Opcode::Rshft => self.exec_binary_uint(opcode, |l, r| l.wrapping_shr(r)),
            Opcode::Lrot => self.exec_binary_uint(opcode, |l, r| l.rotate_left(r % 32)),
            Opcode::Rrot => self.exec_binary_uint(opcode, |l, r| l.rotate_right(r % 32)),

            // ---- Bitwise, signed ----
            Opcode::Ands => self.exec_binary_int(opcode, |l, r| l & r),
            Opcode::Nots => self.exec_unary_int(opcode, |v| !v),
            Opcode::Xors => self.exec_binary_int(opcode, |l, r| l ^ r),
            Opcode::Ors => self.exec_binary_int(opcode, |l, r| l | r),
            Opcode::Lshfts => {
                self.exec_binary_int(opcode, |l, r| l.wrapping_shl(r as u32))
            }
            Opcode::Rshfts => {
                // Arithmetic shift: sign bit propagates.
                self.exec_binary_int(opcode, |l, r| l.wrapping_shr(r as u32))
            }
            Opcode::Lrots => {
                self.exec_binary_int(opcode, |l, r| l.rotate_left(r as u32 % 32))
            }
            Opcode::Rrots => {
                self.exec_binary_int(opcode, |l, r| l.rotate_right(r as u32 % 32))
            }

            // ---- Inspection ----
            Opcode::Nspctr => {
                let code = self.inspect_type_code()?;
                let addr = self.ram.fetch_word(self.ip + 2)?;
                let value = match code {
                    TypeCode::Uint32 => TypedValue::Uint32(self.ram.read_uint(addr)?),
                    TypeCode::Int32 => TypedValue::Int32(self.ram.read_int(addr)?),
                    TypeCode::Uint8 => TypedValue::Uint8(self.ram.read_byte(addr)?),
                };
                self.inspections.push(Inspection {
                    location: InspectLocation::Ram(addr),
                    value,
                });
                self.advance(opcode)
            }
            Opcode::Nspctst => {
                let code = self.inspect_type_code()?;
                let offset = self.ram.fetch_word(self.ip + 2)?;
                let value = self.wstk.read_at_offset(offset, code)?;
                self.inspections.push(Inspection {
                    location: InspectLocation::Stack(offset),
                    value,
                });
                self.advance(opcode)
            }

            // ---- Debug ----
            Opcode::Brkp => {
                self.break_hit = true;
                self.advance(opcode)
            }
        }
    }

    /// Advances past the opcode and all of its immediates.
    fn advance(&mut self, opcode: Opcode) -> Result<(), Fault> {
        self.ip += opcode.width();
        Ok(())
    }

    /// Conditional jump: take the immediate target or fall through.
    fn jump_if(&mut self, opcode: Opcode, taken: bool) -> Result<(), Fault> {
        if taken {
            self.ip = self.imm_word(0)?;
            Ok(())
        } else {
            self.advance(opcode)
        }
    }

    /// `je`/`jn`: word-width byte compare of top and second, not tag-aware.
    fn exec_byte_compare_jump(&mut self, opcode: Opcode, want_equal: bool) -> Result<(), Fault> {
        let top = self.wstk.raw_top_word()?;
        let second = self.wstk.raw_second_word()?;
        self.jump_if(opcode, (top == second) == want_equal)
    }

    /// Unary in-place op on the top uint32.
    fn exec_unary_uint(&mut self, opcode: Opcode, op: fn(u32) -> u32) -> Result<(), Fault> {
        let v = self.wstk.top_uint()?;
        self.wstk.set_top(TypedValue::Uint32(op(v)))?;
        self.advance(opcode)
    }

    /// Unary in-place op on the top int32.
    fn exec_unary_int(&mut self, opcode: Opcode, op: fn(i32) -> i32) -> Result<(), Fault> {
        let v = self.wstk.top_int()?;
        self.wstk.set_top(TypedValue::Int32(op(v)))?;
        self.advance(opcode)
    }

    /// Binary op: pop right, pop left, push `op(left, right)`.
    fn exec_binary_uint(&mut self, opcode: Opcode, op: fn(u32, u32) -> u32) -> Result<(), Fault> {
        let right = self.wstk.pop_uint()?;
        let left = self.wstk.pop_uint()?;
        self.wstk.push(TypedValue::Uint32(op(left, right)))?;
        self.advance(opcode)
    }

    /// Binary op on int32 operands.
    fn exec_binary_int(&mut self, opcode: Opcode, op: fn(i32, i32) -> i32) -> Result<(), Fault> {
        let right = self.wstk.pop_int()?;
        let left = self.wstk.pop_int()?;
        self.wstk.push(TypedValue::Int32(op(left, right)))?;
        self.advance(opcode)
    }

    /// Division-family op: a zero right operand faults before anything is
    /// popped, leaving the stack height unchanged.
    fn exec_divide_uint(&mut self, opcode: Opcode, op: fn(u32, u32) -> u32) -> Result<(), Fault> {
        if self.wstk.top_uint()? == 0 {
            return Err(Fault::DivisionByZero);
        }
        self.exec_binary_uint(opcode, op)
    }

    fn exec_divide_int(&mut self, opcode: Opcode, op: fn(i32, i32) -> i32) -> Result<(), Fault> {
        if self.wstk.top_int()? == 0 {
            return Err(Fault::DivisionByZero);
        }
        self.exec_binary_int(opcode, op)
    }

    /// Decodes the one-byte type code immediate of an inspection opcode.
    fn inspect_type_code(&self) -> Result<TypeCode, Fault> {
        let byte = self.ram.fetch_byte(self.ip + 1)?;
        TypeCode::try_from(byte).map_err(|_| Fault::InvalidTypeCode { code: byte })
    }
}
