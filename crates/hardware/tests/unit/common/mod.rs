//! Tests for shared bit-manipulation helpers.
