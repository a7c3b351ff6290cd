//! Defines the binary operators the calculator can execute

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use num_bigint::BigInt;

use crate::{calc_operations::*, BitRange};

/// Determines the family of a [`CalcOp`]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OpType {
    Arith,
    Bitwise,
    Shift,
    Rotate,
}

impl Display for OpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arith => write!(f, "arith"),
            Self::Bitwise => write!(f, "bitwise"),
            Self::Shift => write!(f, "shift"),
            Self::Rotate => write!(f, "rotate"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidNameError;

impl Display for InvalidNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid op name")
    }
}

impl std::error::Error for InvalidNameError {}

/// Internal macro used to define all ops in the [`CalcOp`] enum
macro_rules! define_ops {
    ( $( ($name:ident, $str_name:expr, $type:ident, $call_fn:ident) ),* $(,)? ) => {
		/// Represents a binary operator of the calculator.
		///
		/// Operators are compared by value, so pressing the same operator twice is detected with
		/// plain `==`.
        #[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
        pub enum CalcOp {
            $(
                $name,
            )*
        }

        impl CalcOp {
            pub const ALL: &'static [CalcOp] = &[ $( Self::$name, )* ];

			/// Returns the (string) name of the operation
            pub const fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$name => $str_name,
                    )*
                }
            }

			/// Returns the [`OpType`] of the operation
            pub const fn op_type(&self) -> OpType {
                match self {
                    $(
                        Self::$name => OpType::$type,
                    )*
                }
            }

			/// Executes the operation on `a` (left) and `b` (right).
			///
			/// Returns the raw result, before normalization, and a flag set when the operation
			/// is undefined for these inputs (division by zero); `a` is returned unchanged in
			/// that case.
            pub fn call(&self, a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
                match self {
                    $(
                        Self::$name => $call_fn(a, b, range),
                    )*
                }
            }

			/// Attempts to create a [`CalcOp`] from a string name, returning an error if the
			/// name is invalid
            pub fn try_from_name(st: &str) -> Result<CalcOp, InvalidNameError> {
                match st {
                    $(
                        $str_name => Ok(Self::$name),
                    )*
                    _ => Err(InvalidNameError)
                }
            }
        }
    };
}

define_ops! {
    (Add, "+", Arith, op_add),
    (Sub, "-", Arith, op_sub),
    (Mul, "*", Arith, op_mul),
    (Div, "/", Arith, op_div),
    (Mod, "mod", Arith, op_mod),
    (And, "and", Bitwise, op_and),
    (Or, "or", Bitwise, op_or),
    (Xor, "xor", Bitwise, op_xor),
    (Asr, "asr", Shift, op_asr),
    (Lsr, "lsr", Shift, op_lsr),
    (Shl, "shl", Shift, op_shl),
    (Rol, "rol", Rotate, op_rol),
    (Ror, "ror", Rotate, op_ror),
}

impl CalcOp {
    /// Shift and rotate operators take an amount as right operand instead of a value
    pub const fn is_shift_or_rotate(&self) -> bool {
        matches!(self.op_type(), OpType::Shift | OpType::Rotate)
    }
}

impl Display for CalcOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalcOp {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_name(s)
    }
}

/// Operators accepted by the memory accumulate keys (M+ and M-)
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MemoryOp {
    Add,
    Sub,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for op in CalcOp::ALL {
            assert_eq!(CalcOp::try_from_name(op.name()), Ok(*op));
            assert_eq!(op.to_string().parse::<CalcOp>(), Ok(*op));
        }
        assert_eq!(CalcOp::try_from_name("nand"), Err(InvalidNameError));
    }

    #[test]
    fn families() {
        assert!(CalcOp::Shl.is_shift_or_rotate());
        assert!(CalcOp::Ror.is_shift_or_rotate());
        assert!(!CalcOp::Xor.is_shift_or_rotate());
        assert_eq!(CalcOp::Mod.op_type(), OpType::Arith);
        assert_eq!(CalcOp::Rol.op_type(), OpType::Rotate);
    }
}
