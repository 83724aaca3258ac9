//! Run statistics.
//!
//! Counters accumulated by the stage dispatchers and reported after the
//! run. Purely observational; nothing in the engine branches on them.

use std::fmt;

/// Counters for one emulated run.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    /// Instructions fully retired (all six stages completed).
    pub retired: u64,
    /// Load instructions that accessed memory.
    pub loads: u64,
    /// Store instructions that accessed memory.
    pub stores: u64,
    /// Control-transfer instructions processed.
    pub branches: u64,
    /// Control-transfer instructions that redirected the PC.
    pub branches_taken: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "retired:         {}", self.retired)?;
        writeln!(f, "loads:           {}", self.loads)?;
        writeln!(f, "stores:          {}", self.stores)?;
        writeln!(f, "branches:        {}", self.branches)?;
        write!(f, "branches taken:  {}", self.branches_taken)
    }
}
