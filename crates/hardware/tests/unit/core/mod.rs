//! Tests for the machine core.

pub mod execution;
