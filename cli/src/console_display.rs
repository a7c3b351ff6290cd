//! Console rendering of the calculator state

use std::collections::BTreeSet;

use bitcalc_core::{CalcDisplay, CalcEngine, RegisterId};
use colored::Colorize;
use num_bigint::BigInt;

/// Patterns wider than this are not printed bit by bit
const MAX_PATTERN_BITS: u32 = 128;

/// [`CalcDisplay`] that buffers notifications and prints them on [`ConsoleDisplay::flush`]
#[derive(Default, Debug)]
pub struct ConsoleDisplay {
    dirty: BTreeSet<RegisterId>,
    config_changed: bool,
    division_by_zero: bool,
    memory: Option<bool>,
    lines: Vec<String>,
    quiet: bool,
}

impl ConsoleDisplay {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, ..Default::default() }
    }

    /// Lines printed so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Renders every pending notification against the current engine state
    pub fn flush(&mut self, engine: &CalcEngine) {
        if self.config_changed {
            let config = engine.config();
            let sign = if config.signed { "signed" } else { "unsigned" };
            self.emit(format!(
                "{} {} bits, {}, radix {}",
                "config".cyan(),
                config.bit_width,
                sign,
                config.radix
            ));
        }
        if self.division_by_zero {
            self.emit(format!("{}", "Cannot divide by zero, press ce or clear".red().bold()));
        }
        for id in std::mem::take(&mut self.dirty) {
            self.emit(format!(
                "{} = {}  {}",
                format!("{:>6}", id.name()).bold(),
                engine.register_string(id).green(),
                bit_pattern(engine, engine.register(id)).dimmed()
            ));
        }
        if let Some(non_zero) = self.memory {
            let label = if non_zero { "M".yellow().bold() } else { "-".normal() };
            self.emit(format!("{}   {}", "memory".bold(), label));
        }
        self.config_changed = false;
        self.division_by_zero = false;
        self.memory = None;
    }

    fn emit(&mut self, line: String) {
        if !self.quiet {
            println!("{line}");
        }
        self.lines.push(line);
    }
}

/// Formats the two's-complement bit pattern of `value`, grouped by nibbles
pub fn bit_pattern(engine: &CalcEngine, value: &BigInt) -> String {
    let range = engine.bit_range();
    let width = range.bit_width();
    if width == 0 || width > MAX_PATTERN_BITS {
        return String::new();
    }
    let digits = range.to_unsigned(value).to_str_radix(2);
    let bits = format!("{:0>width$}", digits, width = width as usize);
    let mut grouped = String::with_capacity(bits.len() + bits.len() / 4);
    for (i, c) in bits.chars().enumerate() {
        if i > 0 && (bits.len() - i) % 4 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

impl CalcDisplay for ConsoleDisplay {
    fn register_changed(&mut self, id: RegisterId, _value: &BigInt) {
        self.dirty.insert(id);
    }

    fn config_changed(&mut self) {
        self.config_changed = true;
        self.dirty.insert(RegisterId::First);
    }

    fn division_by_zero(&mut self) {
        self.division_by_zero = true;
    }

    fn memory_indicator(&mut self, non_zero: bool) {
        self.memory = Some(non_zero);
    }
}
