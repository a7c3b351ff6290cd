use anyhow::{Context, Result};
use bitcalc_core::{CalcConfig, Calculator};
use std::{fmt, path::PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::{parse_line, ConsoleDisplay};

/// Calculator options shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CalcArgs {
    /// Register width in bits, overrides the configuration file
    #[clap(short = 'b', long, value_name = "BITS")]
    pub bits: Option<u32>,

    /// Interpret registers as unsigned integers
    #[clap(short = 'u', long, default_value_t = false)]
    pub unsigned: bool,

    /// Radix used to type and print numbers, overrides the configuration file
    #[clap(short = 'r', long, value_name = "RADIX")]
    pub radix: Option<u32>,

    /// JSON configuration file with `signed`, `bit_width` and `radix` fields
    #[clap(short = 'c', long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Only print the final registers
    #[clap(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level")]
    pub verbose: u8,
}

impl CalcArgs {
    /// Builds the engine configuration: defaults, then the configuration file, then flags
    pub fn calc_config(&self) -> Result<CalcConfig> {
        let mut config = match &self.config {
            Some(path) => CalcConfig::from_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => CalcConfig::default(),
        };
        if let Some(bits) = self.bits {
            config.bit_width = bits;
        }
        if let Some(radix) = self.radix {
            config.radix = radix;
        }
        if self.unsigned {
            config.signed = false;
        }
        config.validate()?;
        Ok(config)
    }

    /// Installs the tracing subscriber; `RUST_LOG` wins over the `-v` count
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // A second initialization (e.g. from tests) is not an error
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(env_filter)
            .try_init();
    }
}

impl fmt::Display for CalcArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BITS: {:?}", self.bits)?;
        writeln!(f, "UNSIGNED: {}", self.unsigned)?;
        writeln!(f, "RADIX: {:?}", self.radix)?;
        writeln!(f, "CONFIG: {:?}", self.config)?;
        writeln!(f, "QUIET: {}", self.quiet)?;
        writeln!(f, "VERBOSE: {}", self.verbose)?;
        Ok(())
    }
}

/// How a rejected key is handled while feeding lines to the calculator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OnError {
    Stop,
    Continue,
}

/// Feeds lines of key tokens to the calculator, rendering after every line
pub fn feed_lines<I, S>(
    calc: &mut Calculator<ConsoleDisplay>,
    lines: I,
    on_error: OnError,
) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (number, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let result = parse_line(line)
            .and_then(|keys| calc.press_all(keys).map_err(anyhow::Error::from))
            .with_context(|| format!("line {}: \"{}\"", number + 1, line.trim()));

        let (engine, display) = calc.engine_and_display_mut();
        display.flush(engine);

        if let Err(e) = result {
            match on_error {
                OnError::Stop => return Err(e),
                OnError::Continue => warn!("{e:#}"),
            }
        }
    }
    Ok(())
}

/// Prints the three registers in the current radix
pub fn print_registers(calc: &Calculator<ConsoleDisplay>) {
    let engine = calc.engine();
    for (id, _) in engine.registers().iter() {
        println!("{:>6} = {}", id.name(), engine.register_string(id));
    }
    if let Some(op) = engine.operation() {
        println!("pending {op}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn calculator(args: &CalcArgs) -> Calculator<ConsoleDisplay> {
        Calculator::new(&args.calc_config().unwrap(), ConsoleDisplay::new(true)).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let args =
            CalcArgs { bits: Some(8), unsigned: true, radix: Some(16), ..Default::default() };
        let config = args.calc_config().unwrap();
        assert_eq!(config, CalcConfig { signed: false, bit_width: 8, radix: 16 });

        let args = CalcArgs { radix: Some(99), ..Default::default() };
        assert!(args.calc_config().is_err());
    }

    #[test]
    fn feeding_a_script() {
        let mut calc = calculator(&CalcArgs { bits: Some(16), ..Default::default() });
        feed_lines(&mut calc, ["3 + 4 * 2 =", "# comment", "shl shl"], OnError::Stop).unwrap();
        assert_eq!(*calc.engine().active_operand(), BigInt::from(1));
        assert_eq!(calc.engine().first_operand(), "28");
    }

    #[test]
    fn errors_stop_or_continue() {
        let mut calc = calculator(&CalcArgs::default());
        let err = feed_lines(&mut calc, ["1 + ??", "5"], OnError::Stop).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));

        let mut calc = calculator(&CalcArgs::default());
        feed_lines(&mut calc, ["radix:99", "5"], OnError::Continue).unwrap();
        assert_eq!(calc.engine().first_operand(), "5");
    }
}
