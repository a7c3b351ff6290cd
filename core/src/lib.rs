//! Arithmetic engine of a programmer's calculator.
//!
//! The engine keeps three arbitrary-precision registers and wraps every value to a configurable
//! bit width and signedness, emulating two's-complement hardware:
//!
//! ```text
//! CalcKey --> Calculator --> CalcEngine --> BitRange::normalize --> Registers
//!                 ^               |
//!                 |               v
//! CalcDisplay <---+------- CalcEvent queue
//! ```
mod bit_range;
mod calc_config;
pub mod calc_definitions;
mod calc_engine;
mod calc_errors;
mod calc_events;
pub mod calc_operations;
pub mod calc_ops;
mod calc_registers;
mod calculator;


pub use bit_range::*;
pub use calc_config::*;
pub use calc_definitions::*;
pub use calc_engine::*;
pub use calc_errors::*;
pub use calc_events::*;
pub use calc_ops::*;
pub use calc_registers::*;
pub use calculator::*;
