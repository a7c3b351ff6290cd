//! Calculator configuration

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    BitRange, CalcError, ErrConfig, DEFAULT_BIT_WIDTH, DEFAULT_RADIX, MAX_BIT_WIDTH, MAX_RADIX,
    MIN_RADIX,
};

/// Calculator configuration structure
///
/// Every field can be changed later on the running engine; this is only the starting point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CalcConfig {
    /// Interpret registers as two's-complement signed integers
    pub signed: bool,
    /// Register width in bits; zero collapses every register to zero
    pub bit_width: u32,
    /// Radix used to parse and print registers
    pub radix: u32,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self { signed: true, bit_width: DEFAULT_BIT_WIDTH, radix: DEFAULT_RADIX }
    }
}

impl fmt::Display for CalcConfig {
    /// Formats a string with the configuration information
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SIGNED: {}", self.signed)?;
        writeln!(f, "BIT_WIDTH: {}", self.bit_width)?;
        writeln!(f, "RADIX: {}", self.radix)?;
        Ok(())
    }
}

impl CalcConfig {
    pub fn new(signed: bool, bit_width: u32) -> Self {
        Self { signed, bit_width, ..Default::default() }
    }

    /// Parses a configuration from a JSON document; missing fields take their default values
    pub fn from_json(json: &str) -> Result<Self, CalcError> {
        let config: CalcConfig = serde_json::from_str(json)
            .map_err(|e| CalcError::Config(ErrConfig::new(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CalcError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            CalcError::Config(ErrConfig::new(format!("cannot read {}: {e}", path.display())))
        })?;
        Self::from_json(&json)
    }

    /// Checks that radix and bit width are inside their accepted ranges
    pub fn validate(&self) -> Result<(), CalcError> {
        validate_radix(self.radix)?;
        validate_bit_width(self.bit_width)
    }

    /// Returns the representable range described by this configuration
    pub fn bit_range(&self) -> BitRange {
        BitRange::new(self.bit_width, self.signed)
    }
}

pub(crate) fn validate_radix(radix: u32) -> Result<(), CalcError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(CalcError::InvalidRadix(radix))
    }
}

pub(crate) fn validate_bit_width(bit_width: u32) -> Result<(), CalcError> {
    if bit_width <= MAX_BIT_WIDTH {
        Ok(())
    } else {
        Err(CalcError::BitWidthOutOfRange(bit_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CalcConfig::default();
        assert!(config.signed);
        assert_eq!(config.bit_width, 64);
        assert_eq!(config.radix, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CalcConfig::from_json(r#"{ "signed": false, "bit_width": 8 }"#).unwrap();
        assert_eq!(config, CalcConfig { signed: false, bit_width: 8, radix: 10 });
    }

    #[test]
    fn json_out_of_range_is_rejected() {
        assert_eq!(CalcConfig::from_json(r#"{ "radix": 1 }"#), Err(CalcError::InvalidRadix(1)));
        assert_eq!(
            CalcConfig::from_json(r#"{ "bit_width": 100000 }"#),
            Err(CalcError::BitWidthOutOfRange(100000))
        );
        assert!(matches!(CalcConfig::from_json("{ nope"), Err(CalcError::Config(_))));
    }

    #[test]
    fn display_lists_every_field() {
        let text = CalcConfig::new(false, 16).to_string();
        assert!(text.contains("SIGNED: false"));
        assert!(text.contains("BIT_WIDTH: 16"));
        assert!(text.contains("RADIX: 10"));
    }
}
