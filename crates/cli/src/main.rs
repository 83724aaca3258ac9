//! ARM64-subset emulator CLI.
//!
//! Loads a flat binary image into guest memory and runs it until `HLT`, a
//! fatal fault, or the step limit. The halt code becomes the process exit
//! code.

use std::{fs, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use armsim_core::sim::load_flat_binary;
use armsim_core::{Config, Machine, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "ARM64-subset sequential emulator",
    long_about = "Run a flat binary image on the emulated machine.\n\nThe image is raw little-endian A64 instruction words with no container\nformat. Execution starts at the entry address and ends at the first HLT.\n\nExamples:\n  sim program.bin\n  sim program.bin --entry 0x100000 --trace\n  sim program.bin --config sim.json"
)]
struct Cli {
    /// Flat binary image to execute.
    image: String,

    /// Guest address to load the image at (defaults to the RAM base).
    #[arg(long, value_parser = parse_addr)]
    base: Option<u64>,

    /// Address of the first instruction (defaults to the load address).
    #[arg(long, value_parser = parse_addr)]
    entry: Option<u64>,

    /// Emit a per-instruction trace on stderr.
    #[arg(long)]
    trace: bool,

    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<String>,
}

/// Accepts `0x`-prefixed hex or plain decimal addresses.
fn parse_addr(text: &str) -> Result<u64, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("invalid address {text:?}: {e}"))
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => match Config::from_json(&text) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("error: bad config {path}: {err}");
                    process::exit(2);
                }
            },
            Err(err) => {
                eprintln!("error: cannot read config {path}: {err}");
                process::exit(2);
            }
        },
        None => Config::default(),
    };
    if cli.trace {
        config.general.trace_instructions = true;
    }

    let default_level = if config.general.trace_instructions {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let base = cli.base.unwrap_or(config.memory.ram_base);
    let entry = cli.entry.unwrap_or(base);
    config.general.start_pc = entry;

    let mut mach = Machine::new(&config);
    let bytes = match load_flat_binary(&mut mach, &cli.image, base) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    println!(
        "Loaded {} ({bytes} bytes at {base:#x}), entry {entry:#x}",
        cli.image
    );

    let mut sim = Simulator::from_machine(mach, &config);
    match sim.run() {
        Ok(code) => {
            println!();
            println!("{}", sim.machine().stats);
            println!();
            println!("halted with code {code:#x}");
            process::exit(i32::from(code.min(0xFF) as u8));
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", sim.machine().stats);
            sim.machine().regs.dump();
            process::exit(1);
        }
    }
}
