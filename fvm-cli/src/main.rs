//! FURST CLI — assemble, disassemble, execute, and trace.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/assembly/decode error
//! - 3: Runtime fault

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "run" => commands::run(&args[2..]),
        "trace" => commands::trace(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: fvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  assemble <input.fasm> [-o output.fbin]   Assemble text to a binary image");
    eprintln!("  disassemble <input.fbin>                 Disassemble an image to text");
    eprintln!("  run <input.fbin> [--ram N]               Execute an image");
    eprintln!("  trace <input.fbin> [--ram N]             Execute, printing each instruction");
}
