use anyhow::{Context, Result};
use bitcalc::{
    commands::{BitcalcRepl, BitcalcRun},
    BITCALC_VERSION_MESSAGE,
};
use clap::Parser;

// Main enum defining the bitcalc subcommands.
#[derive(Parser)]
#[command(
    name = "bitcalc",
    bin_name = "bitcalc",
    version = BITCALC_VERSION_MESSAGE,
    about = "Programmer's calculator with fixed-width two's-complement registers",
    long_about = "bitcalc executes calculator keys on three registers (first, second, memory) \
                  that wrap to a configurable bit width and signedness."
)]
pub enum Bitcalc {
    Run(BitcalcRun),
    Repl(BitcalcRepl),
}

fn main() -> Result<()> {
    // Parse command-line arguments and handle errors if they occur.
    let args = Bitcalc::parse();

    match args {
        Bitcalc::Run(cmd) => {
            cmd.run().context("Error executing Run command")?;
        }
        Bitcalc::Repl(cmd) => {
            cmd.run().context("Error executing Repl command")?;
        }
    }

    Ok(())
}
