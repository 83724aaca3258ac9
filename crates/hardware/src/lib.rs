//! ARM64-subset instruction emulator library.
//!
//! This crate implements a sequential five-stage emulator for a reduced
//! ARM64-like instruction set with the following:
//! 1. **Core:** Machine state (registers, NZCV flags, PC) and the per-stage
//!    dispatch engine (fetch, decode, execute, memory, writeback, update-PC).
//! 2. **ISA:** The opcode class table, bitfield decoding of 32-bit
//!    instruction words, and condition-code definitions.
//! 3. **Memory:** A byte-addressable RAM model with width-specific accessors
//!    and explicit fault reporting.
//! 4. **Simulation:** Flat-image loader, configuration, driving loop, and
//!    statistics collection.
//!
//! The pipeline stage names describe the order of per-instruction
//! transformations only; stages run strictly in sequence for one
//! instruction at a time, with no overlap modeled.

/// Architectural state: register file and condition flags.
pub mod arch;
/// Common types (bit extraction, constants, error types).
pub mod common;
/// Emulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Machine context, instruction record, ALU, and stage dispatchers.
pub mod core;
/// Instruction set (opcode enumeration, class table, register ABI names).
pub mod isa;
/// Byte-addressable memory model.
pub mod mem;
/// Binary loader and driving loop.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Machine context; owns registers, flags, PC, memory, and the opcode table.
pub use crate::core::Machine;
/// Driving loop; construct with `Simulator::new` and call `run`.
pub use crate::sim::simulator::Simulator;
