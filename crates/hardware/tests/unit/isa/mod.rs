//! Tests for the opcode class table and condition codes.

pub mod cond;
