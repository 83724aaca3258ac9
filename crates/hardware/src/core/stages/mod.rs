//! The six stage dispatchers.
//!
//! One instruction record flows through fetch, decode, execute, memory,
//! writeback, and update-PC, in that order. Each dispatcher routes the
//! record to the per-opcode or shared routine for its stage via an
//! exhaustive match over `Opcode`; the sentinels have an explicit fatal
//! arm at every stage.

/// Decode and read operands.
pub mod decode;
/// Compute ALU results, addresses, branch targets, and flags.
pub mod execute;
/// Instruction fetch.
pub mod fetch;
/// Memory access.
pub mod memory;
/// Decide the next PC.
pub mod update_pc;
/// Commit results to the register file.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::memory_stage;
pub use update_pc::update_pc_stage;
pub use writeback::writeback_stage;
