pub mod commands;
mod console_display;
mod keys;

pub use console_display::*;
pub use keys::*;

pub const BITCALC_VERSION_MESSAGE: &str = env!("CARGO_PKG_VERSION");
