//! Representable range of a fixed-width register
//!
//! A [`BitRange`] describes the set of integers a register can hold for a given bit width and
//! signedness, and maps any integer onto that set the way two's-complement hardware wraps:
//!
//! ```text
//!   bits  signed  range
//!   ----  ------  ---------------------------
//!   0     any     {0}
//!   8     true    [-128, 127]
//!   8     false   [0, 255]
//!   n     true    [-2^(n-1), 2^(n-1) - 1]
//!   n     false   [0, 2^n - 1]
//! ```

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitRange {
    bit_width: u32,
    signed: bool,
    /// 2^(bit_width-1), or zero when bit_width is zero
    half_range: BigInt,
}

impl BitRange {
    pub fn new(bit_width: u32, signed: bool) -> Self {
        Self { bit_width, signed, half_range: Self::half_range_of(bit_width) }
    }

    fn half_range_of(bit_width: u32) -> BigInt {
        if bit_width == 0 {
            BigInt::zero()
        } else {
            BigInt::one() << (bit_width - 1)
        }
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn half_range(&self) -> &BigInt {
        &self.half_range
    }

    /// Returns 2^bit_width, the modulus all register arithmetic wraps around
    pub fn modulus(&self) -> BigInt {
        &self.half_range << 1
    }

    /// Changes the bit width, re-deriving the half range
    pub fn set_bit_width(&mut self, bit_width: u32) {
        self.bit_width = bit_width;
        self.half_range = Self::half_range_of(bit_width);
    }

    /// Changes the signedness; the half range does not depend on it
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }

    /// Returns the raw bit pattern of `value` read as an unsigned integer, i.e. `value` reduced
    /// modulo 2^bit_width into [0, 2^bit_width).
    pub fn to_unsigned(&self, value: &BigInt) -> BigInt {
        if self.bit_width == 0 {
            return BigInt::zero();
        }
        let modulus = self.modulus();
        let reduced = value % &modulus;
        if reduced.is_negative() {
            reduced + modulus
        } else {
            reduced
        }
    }

    /// Returns the unique integer congruent to `value` modulo 2^bit_width that lies in the
    /// representable range.
    pub fn normalize(&self, value: &BigInt) -> BigInt {
        let reduced = self.to_unsigned(value);
        if self.signed && reduced >= self.half_range {
            reduced - self.modulus()
        } else {
            reduced
        }
    }

    /// Returns true if `value` is already representable
    pub fn contains(&self, value: &BigInt) -> bool {
        *value >= self.min_value() && *value <= self.max_value()
    }

    pub fn min_value(&self) -> BigInt {
        if self.signed {
            -&self.half_range
        } else {
            BigInt::zero()
        }
    }

    pub fn max_value(&self) -> BigInt {
        if self.bit_width == 0 {
            BigInt::zero()
        } else if self.signed {
            &self.half_range - 1
        } else {
            self.modulus() - 1
        }
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { "signed" } else { "unsigned" };
        write!(f, "{} bits {} [{}, {}]", self.bit_width, sign, self.min_value(), self.max_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTHS: [u32; 7] = [0, 1, 4, 8, 16, 32, 64];

    fn big(value: i128) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn twos_complement_wraps() {
        assert_eq!(BitRange::new(8, true).normalize(&big(200)), big(-56));
        assert_eq!(BitRange::new(8, false).normalize(&big(-1)), big(255));
        assert_eq!(BitRange::new(8, true).normalize(&big(-129)), big(127));
        assert_eq!(BitRange::new(8, false).normalize(&big(256)), big(0));
        assert_eq!(BitRange::new(1, true).normalize(&big(1)), big(-1));
        assert_eq!(BitRange::new(1, false).normalize(&big(3)), big(1));
    }

    #[test]
    fn zero_width_collapses_to_zero() {
        for signed in [true, false] {
            let range = BitRange::new(0, signed);
            for value in [-5, -1, 0, 1, 12345] {
                assert_eq!(range.normalize(&big(value)), big(0));
            }
            assert_eq!(range.min_value(), big(0));
            assert_eq!(range.max_value(), big(0));
        }
    }

    #[test]
    fn normalize_is_idempotent_and_in_range() {
        let samples: Vec<BigInt> = [
            0,
            1,
            -1,
            7,
            -8,
            200,
            -200,
            i64::MAX as i128,
            i64::MIN as i128,
            u64::MAX as i128,
            i128::MAX,
            i128::MIN,
        ]
        .iter()
        .map(|v| big(*v))
        .collect();

        for bits in WIDTHS {
            for signed in [true, false] {
                let range = BitRange::new(bits, signed);
                for x in &samples {
                    let once = range.normalize(x);
                    assert_eq!(range.normalize(&once), once, "{range} x={x}");
                    assert!(range.contains(&once), "{range} x={x} -> {once}");
                }
            }
        }
    }

    #[test]
    fn normalize_keeps_congruence() {
        let range = BitRange::new(16, true);
        for x in [-70000i128, -1, 40000, 65535, 65536, 1 << 40] {
            let n = range.normalize(&big(x));
            assert!(((big(x) - n) % range.modulus()).is_zero());
        }
    }

    #[test]
    fn bounds() {
        let range = BitRange::new(4, true);
        assert_eq!(range.min_value(), big(-8));
        assert_eq!(range.max_value(), big(7));
        assert!(!range.contains(&big(8)));
        assert!(range.contains(&big(-8)));

        let range = BitRange::new(4, false);
        assert_eq!(range.min_value(), big(0));
        assert_eq!(range.max_value(), big(15));
        assert!(!range.contains(&big(-1)));
    }

    #[test]
    fn to_unsigned_reads_the_bit_pattern() {
        let range = BitRange::new(8, true);
        assert_eq!(range.to_unsigned(&big(-1)), big(0xff));
        assert_eq!(range.to_unsigned(&big(-128)), big(0x80));
        assert_eq!(range.to_unsigned(&big(5)), big(5));
    }

    #[test]
    fn resizing_rederives_half_range() {
        let mut range = BitRange::new(8, true);
        range.set_bit_width(16);
        assert_eq!(*range.half_range(), big(0x8000));
        range.set_bit_width(0);
        assert!(range.half_range().is_zero());
        range.set_signed(false);
        range.set_bit_width(3);
        assert_eq!(range.max_value(), big(7));
    }
}
