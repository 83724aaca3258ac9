//! Error definitions for the emulator.
//!
//! Two error classes exist, mirroring the two failure policies of the
//! engine:
//! 1. **Memory faults:** reported by the memory collaborator and treated as
//!    fatal to the run: no partial-instruction recovery, no retry.
//! 2. **Internal-consistency failures:** an unassigned opcode reaching a
//!    stage dispatcher or a decode integrity check failing. These indicate
//!    the opcode table or decode logic itself is broken, never bad guest
//!    input, and are surfaced as explicit errors rather than aborts so test
//!    harnesses can observe them.
//!
//! There is no warn-and-continue path: any anomaly ends the emulated run.

use thiserror::Error;

use crate::isa::opcode::Opcode;

/// Fault reported by the memory collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemFault {
    /// The access touched bytes outside the modeled RAM range.
    #[error("address {addr:#x} ({width} bytes) outside memory range")]
    OutOfRange {
        /// Faulting address.
        addr: u64,
        /// Access width in bytes.
        width: u8,
    },

    /// The access address is not a multiple of the access width.
    #[error("misaligned {width}-byte access at {addr:#x}")]
    Misaligned {
        /// Faulting address.
        addr: u64,
        /// Access width in bytes.
        width: u8,
    },
}

/// Internal-consistency failure: the engine itself is broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A sentinel opcode reached a stage dispatcher.
    #[error("opcode {op:?} reached the {stage} dispatcher")]
    UnassignedOpcode {
        /// The sentinel that leaked through decode.
        op: Opcode,
        /// Name of the stage that observed it.
        stage: &'static str,
    },

    /// A fixed-pattern decode integrity check failed.
    #[error("decode integrity: expected {expected:#010x}, got {got:#010x}")]
    DecodeIntegrity {
        /// The exact encoding the opcode table implies.
        expected: u32,
        /// The word actually fetched.
        got: u32,
    },

    /// A reserved immediate encoding appeared under a valid opcode key.
    #[error("reserved immediate encoding in word {word:#010x}")]
    ReservedEncoding {
        /// The offending instruction word.
        word: u32,
    },
}

/// Top-level emulator error surfaced to the driving loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EmuError {
    /// A memory access failed; the run terminates without committing
    /// further state.
    #[error("memory fault: {0}")]
    Memory(#[from] MemFault),

    /// The opcode table or decode logic is inconsistent.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}
