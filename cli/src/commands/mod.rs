mod common;
mod repl;
mod run;

pub use common::*;
pub use repl::*;
pub use run::*;
