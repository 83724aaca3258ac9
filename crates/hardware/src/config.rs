//! Configuration system for the emulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants (RAM geometry, entry point, step
//!    limit).
//! 2. **Structures:** Hierarchical config for general behavior and memory.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Base address of guest RAM.
    pub const RAM_BASE: u64 = 0x0010_0000;

    /// Total size of guest RAM (16 MiB).
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Default entry point (start of RAM).
    pub const START_PC: u64 = RAM_BASE;

    /// Step limit guarding against runaway guest programs.
    pub const MAX_STEPS: u64 = 10_000_000;
}

/// Root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General run behavior.
    pub general: GeneralConfig,
    /// Memory geometry.
    pub memory: MemoryConfig,
}

/// General run behavior.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Address of the first instruction to fetch.
    pub start_pc: u64,
    /// Emit a per-stage trace of every instruction.
    pub trace_instructions: bool,
    /// Abort the run with an error after this many instructions.
    pub max_steps: u64,
    /// Treat `HLT` as an error termination instead of a clean stop.
    pub halt_is_failure: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            trace_instructions: false,
            max_steps: defaults::MAX_STEPS,
            halt_is_failure: false,
        }
    }
}

/// Memory geometry.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Lowest valid guest address.
    pub ram_base: u64,
    /// RAM size in bytes.
    pub ram_size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

impl Config {
    /// Deserializes a configuration from JSON text.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error message on malformed input.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}
