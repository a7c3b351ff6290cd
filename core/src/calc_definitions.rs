//! This module contains constant definitions used by other modules and crates.

/// Bit width used when no configuration is provided
pub const DEFAULT_BIT_WIDTH: u32 = 64;

/// Largest accepted bit width.  Wider registers are representable, but rotating or printing them
/// one bit at a time stops being useful for a calculator.
pub const MAX_BIT_WIDTH: u32 = 4096;

/// Radix used when no configuration is provided
pub const DEFAULT_RADIX: u32 = 10;

/// Accepted radix range, bounded by the digits 0-9 and a-z
pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// Number of registers held by the engine: first, second and memory
pub const REGISTERS_COUNT: usize = 3;
