use anyhow::{Context, Result};
use bitcalc_core::Calculator;
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::{ConsoleDisplay, BITCALC_VERSION_MESSAGE};

use super::{feed_lines, print_registers, CalcArgs, OnError};

// Structure representing the 'repl' subcommand.
#[derive(clap::Args)]
#[command(author, about, long_about = None, version = BITCALC_VERSION_MESSAGE)]
pub struct BitcalcRepl {
    #[clap(flatten)]
    pub calc: CalcArgs,
}

impl BitcalcRepl {
    pub fn run(&self) -> Result<()> {
        self.calc.init_tracing();
        let config = self.calc.calc_config()?;
        info!("Starting session with configuration:\n{config}");

        let mut calc = Calculator::new(&config, ConsoleDisplay::new(self.calc.quiet))?;

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            let engine = calc.engine();
            match engine.operation() {
                Some(op) if engine.is_operation_underway() => {
                    print!("{} {op} {}> ", engine.first_operand(), engine.second_operand())
                }
                _ => print!("{}> ", engine.first_operand()),
            }
            stdout.flush().context("flushing prompt")?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line).context("reading keys")? == 0 {
                break;
            }
            if line.trim() == "quit" {
                break;
            }
            // Rejected keys are reported and the session goes on
            feed_lines(&mut calc, [line.as_str()], OnError::Continue)?;
        }

        println!();
        print_registers(&calc);
        Ok(())
    }
}
