//! FURST virtual machine — executes raw program images.
//!
//! The machine is a flat-memory, stack-based engine with:
//! - Tagged main memory (one type tag per byte address)
//! - A typed work stack for expression evaluation
//! - A fixed-depth call stack of return addresses
//! - A single loop-register context
//!
//! Execution is single-threaded and synchronous; one machine owns its
//! memory exclusively, and an in-flight instruction always completes or
//! faults atomically. Timeouts, if a host needs them, belong between
//! `step()` calls, not inside the engine.
//!
//! # Usage
//!
//! ```
//! use furst_common::{ImageBuilder, Opcode};
//! use furst_vm::{run_image, ExecutionState};
//!
//! let mut b = ImageBuilder::new();
//! let entry = b.here();
//! b.op(Opcode::Psh).word(5);
//! b.op(Opcode::Psh).word(3);
//! b.op(Opcode::Add);
//! b.op(Opcode::Die);
//! let image = b.finish(entry);
//!
//! let machine = run_image(&image, 4096).unwrap();
//! assert_eq!(machine.state(), &ExecutionState::Halted(0));
//! assert_eq!(machine.stack().top_uint(), Ok(8));
//! ```

pub mod debug;
pub mod error;
pub mod execute;
pub mod inspect;
pub mod machine;
pub mod memory;
pub mod stack;

pub use error::Fault;
pub use inspect::{InspectLocation, Inspection};
pub use machine::{ExecutionState, Machine, RAM_MAX, RECUR_MAX, STACK_SIZE};
pub use memory::{Tag, TaggedMemory};
pub use stack::WorkStack;

/// Loads an image into a fresh machine and runs it to completion.
///
/// Returns the finished machine so the caller can inspect its state,
/// stack, and memory. Load-time problems (truncated or oversized image,
/// bad bootstrap pointer) are returned as `Err`; execution faults are in
/// the machine's [`ExecutionState`].
pub fn run_image(image: &[u8], ram_capacity: u32) -> Result<Machine, Fault> {
    let mut machine = Machine::new(ram_capacity);
    machine.load_image(image)?;
    machine.run();
    Ok(machine)
}
