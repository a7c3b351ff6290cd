use std::{error::Error, fmt};

use crate::{MAX_BIT_WIDTH, MAX_RADIX, MIN_RADIX};

/// Errors returned at the engine boundary.
///
/// Overflowing digits and division by zero are not errors: the first is silently dropped and
/// the second is latched inside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    InvalidRadix(u32),
    BitWidthOutOfRange(u32),
    InvalidDigit { digit: char, radix: u32 },
    InvalidNumber { text: String, radix: u32 },
    Config(ErrConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrConfig {
    pub description: String,
}

impl ErrConfig {
    // Accept any type that can be converted into a String
    pub fn new<D>(description: D) -> ErrConfig
    where
        D: Into<String>,
    {
        ErrConfig { description: description.into() }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidRadix(radix) => {
                write!(f, "Radix {radix} out of range [{MIN_RADIX}, {MAX_RADIX}]")
            }
            CalcError::BitWidthOutOfRange(bits) => {
                write!(f, "Bit width {bits} out of range [0, {MAX_BIT_WIDTH}]")
            }
            CalcError::InvalidDigit { digit, radix } => {
                write!(f, "'{digit}' is not a digit in radix {radix}")
            }
            CalcError::InvalidNumber { text, radix } => {
                write!(f, "\"{text}\" is not a number in radix {radix}")
            }
            CalcError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CalcError::Config(e) => Some(e),
            CalcError::InvalidRadix(_) => None,
            CalcError::BitWidthOutOfRange(_) => None,
            CalcError::InvalidDigit { .. } => None,
            CalcError::InvalidNumber { .. } => None,
        }
    }
}

impl fmt::Display for ErrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration: {}", self.description)
    }
}

impl Error for ErrConfig {}
