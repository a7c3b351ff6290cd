//! Calculator registers
//!
//! | Register | Index | Usage                                                  |
//! |----------|-------|--------------------------------------------------------|
//! | First    | 0     | Left operand, and the result of every operation        |
//! | Second   | 1     | Right operand, or the amount of a shift/rotate         |
//! | Memory   | 2     | User scratch register, only touched by memory keys     |

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use num_bigint::BigInt;
use num_traits::Zero;

use crate::REGISTERS_COUNT;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum RegisterId {
    First,
    Second,
    Memory,
}

impl RegisterId {
    pub const ALL: [RegisterId; REGISTERS_COUNT] =
        [RegisterId::First, RegisterId::Second, RegisterId::Memory];

    pub const fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Memory => 2,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The register file: three arbitrary-precision slots addressed by [`RegisterId`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    values: [BigInt; REGISTERS_COUNT],
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self { values: [BigInt::zero(), BigInt::zero(), BigInt::zero()] }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegisterId, &BigInt)> {
        RegisterId::ALL.into_iter().map(move |id| (id, &self.values[id.index()]))
    }
}

impl Index<RegisterId> for Registers {
    type Output = BigInt;

    fn index(&self, id: RegisterId) -> &BigInt {
        &self.values[id.index()]
    }
}

impl IndexMut<RegisterId> for Registers {
    fn index_mut(&mut self, id: RegisterId) -> &mut BigInt {
        &mut self.values[id.index()]
    }
}
