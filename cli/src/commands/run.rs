use anyhow::{Context, Result};
use bitcalc_core::Calculator;
use std::{fs, path::PathBuf};
use tracing::info;

use crate::{ConsoleDisplay, BITCALC_VERSION_MESSAGE};

use super::{feed_lines, print_registers, CalcArgs, OnError};

// Structure representing the 'run' subcommand.
#[derive(clap::Args)]
#[command(author, about, long_about = None, version = BITCALC_VERSION_MESSAGE)]
pub struct BitcalcRun {
    #[clap(flatten)]
    pub calc: CalcArgs,

    /// Script file with key tokens, executed before the command line keys
    #[clap(short = 's', long, value_name = "SCRIPT_FILE")]
    pub script: Option<PathBuf>,

    /// Key tokens, e.g. `3 + 4 "*" 2 =`
    #[clap(allow_hyphen_values = true)]
    pub keys: Vec<String>,
}

impl BitcalcRun {
    pub fn run(&self) -> Result<()> {
        self.calc.init_tracing();
        let config = self.calc.calc_config()?;
        info!("Running with configuration:\n{config}");

        let mut calc = Calculator::new(&config, ConsoleDisplay::new(self.calc.quiet))?;

        if let Some(script) = &self.script {
            let text = fs::read_to_string(script)
                .with_context(|| format!("reading script {}", script.display()))?;
            feed_lines(&mut calc, text.lines(), OnError::Stop)
                .with_context(|| format!("in script {}", script.display()))?;
        }
        if !self.keys.is_empty() {
            feed_lines(&mut calc, [self.keys.join(" ")], OnError::Stop)?;
        }

        print_registers(&calc);
        Ok(())
    }
}
