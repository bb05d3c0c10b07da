//! CLI command implementations.

use std::fs;

use furst_common::Opcode;
use furst_vm::{ExecutionState, Machine};

/// Default main memory for `run`/`trace`; override with `--ram`.
const DEFAULT_RAM: u32 = 1 << 20;

/// Assemble a .fasm text file to a .fbin image.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires an input file");
        eprintln!("Usage: fvm assemble <input.fasm> [-o output.fbin]");
        return Err(1);
    }

    let input = &args[0];

    let output = if args.len() >= 3 && args[1] == "-o" {
        args[2].clone()
    } else if let Some(stem) = input.strip_suffix(".fasm") {
        format!("{stem}.fbin")
    } else {
        format!("{input}.fbin")
    };

    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    let image = furst_asm::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    fs::write(&output, &image).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;

    eprintln!("assembled {} bytes -> {output}", image.len());
    Ok(())
}

/// Disassemble a .fbin image to text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: fvm disassemble <input.fbin>");
        return Err(1);
    }

    let input = &args[0];
    let image = read_image(input)?;
    let text = furst_asm::disassemble(&image).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    print!("{text}");
    Ok(())
}

/// Execute a .fbin image.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (input, ram) = parse_exec_args(args, "run")?;
    let image = read_image(&input)?;

    let mut machine = Machine::new(ram);
    machine.load_image(&image).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    let state = machine.run();
    for record in machine.take_inspections() {
        println!("{record}");
    }
    finish(&state)
}

/// Execute a .fbin image, printing each instruction as it runs.
pub fn trace(args: &[String]) -> Result<(), i32> {
    let (input, ram) = parse_exec_args(args, "trace")?;
    let image = read_image(&input)?;

    let mut machine = Machine::new(ram);
    machine.load_image(&image).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    loop {
        let addr = machine.ip();
        let mnemonic = machine
            .ram()
            .fetch_byte(addr)
            .ok()
            .and_then(|byte| Opcode::try_from(byte).ok())
            .map(|op| op.mnemonic())
            .unwrap_or("??");
        println!("[{addr:#06x}] {mnemonic}");

        let state = machine.step();
        for record in machine.take_inspections() {
            println!("{record}");
        }
        if state.is_terminal() {
            return finish(&state);
        }
    }
}

fn finish(state: &ExecutionState) -> Result<(), i32> {
    match state {
        ExecutionState::Halted(code) => {
            eprintln!("halted (exit {code})");
            Ok(())
        }
        ExecutionState::Faulted { fault, at } => {
            eprintln!("runtime fault at address {at}: {fault}");
            Err(3)
        }
        ExecutionState::Running => unreachable!("run loop returned while running"),
    }
}

fn read_image(input: &str) -> Result<Vec<u8>, i32> {
    fs::read(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })
}

fn parse_exec_args(args: &[String], command: &str) -> Result<(String, u32), i32> {
    if args.is_empty() {
        eprintln!("error: {command} requires an input file");
        eprintln!("Usage: fvm {command} <input.fbin> [--ram N]");
        return Err(1);
    }

    let input = args[0].clone();
    let mut ram = DEFAULT_RAM;

    let mut rest = &args[1..];
    while !rest.is_empty() {
        if rest[0] == "--ram" && rest.len() >= 2 {
            ram = rest[1].parse().map_err(|_| {
                eprintln!("error: invalid --ram value '{}'", rest[1]);
                1
            })?;
            rest = &rest[2..];
        } else {
            eprintln!("error: unexpected argument '{}'", rest[0]);
            return Err(1);
        }
    }

    Ok((input, ram))
}
