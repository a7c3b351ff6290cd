//! Calculator operator implementations
//!
//! Every function takes the left operand `a`, the right operand `b` and the current
//! [`BitRange`], and returns the raw result together with a flag that marks an undefined
//! operation.  Results are normalized by the caller, so they may lie outside the range.
//! Shift and rotate amounts that cannot be represented never panic nor allocate huge
//! intermediate values: they saturate to the value the full shift would produce.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::BitRange;

#[inline(always)]
pub fn op_add(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a + b, false)
}

#[inline(always)]
pub fn op_sub(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a - b, false)
}

#[inline(always)]
pub fn op_mul(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a * b, false)
}

/// Quotient truncated toward zero; a zero divisor returns `a` and sets the flag
#[inline(always)]
pub fn op_div(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    if b.is_zero() {
        return (a.clone(), true);
    }
    (a / b, false)
}

/// Mathematical modulo: the result is always in [0, |b|)
#[inline(always)]
pub fn op_mod(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    if b.is_zero() {
        return (a.clone(), true);
    }
    let r = a % b;
    if r.is_negative() {
        (r + b.abs(), false)
    } else {
        (r, false)
    }
}

#[inline(always)]
pub fn op_and(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a & b, false)
}

#[inline(always)]
pub fn op_or(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a | b, false)
}

#[inline(always)]
pub fn op_xor(a: &BigInt, b: &BigInt, _range: &BitRange) -> (BigInt, bool) {
    (a ^ b, false)
}

/// Splits a shift amount into its direction and magnitude.  A negative amount shifts the
/// other way; None when the magnitude does not fit a `u64`.
fn shift_amount(b: &BigInt) -> Option<(bool, u64)> {
    b.magnitude().to_u64().map(|amount| (b.is_negative(), amount))
}

/// Sign-extending right shift, clamped to the bit length of `a` where only the sign fill is left
fn shift_right_arith(a: &BigInt, amount: u64) -> BigInt {
    a >> amount.min(a.bits())
}

/// Left shift; every bit leaves the register once the amount reaches the bit width
fn shift_left(a: &BigInt, amount: u64, range: &BitRange) -> BigInt {
    if amount < u64::from(range.bit_width()) {
        a << amount
    } else {
        BigInt::zero()
    }
}

/// Arithmetic shift right.  An amount that does not fit drains `a` to its sign fill (0 or -1).
#[inline(always)]
pub fn op_asr(a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
    match shift_amount(b) {
        Some((false, amount)) => (shift_right_arith(a, amount), false),
        Some((true, amount)) => (shift_left(a, amount, range), false),
        None => (shift_right_arith(a, a.bits()), false),
    }
}

/// Logical shift right: the bit pattern of `a` is read as unsigned and zeros are shifted in
#[inline(always)]
pub fn op_lsr(a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
    let pattern = range.to_unsigned(a);
    match shift_amount(b) {
        Some((false, amount)) if amount < u64::from(range.bit_width()) => {
            (pattern >> amount, false)
        }
        Some((true, amount)) => (shift_left(&pattern, amount, range), false),
        _ => (BigInt::zero(), false),
    }
}

/// Shift left; a negative amount shifts right keeping the sign
#[inline(always)]
pub fn op_shl(a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
    match shift_amount(b) {
        Some((false, amount)) => (shift_left(a, amount, range), false),
        Some((true, amount)) => (shift_right_arith(a, amount), false),
        None => (BigInt::zero(), false),
    }
}

/// Returns `b mod bit_width` as a rotation count, or None for a zero-width register
fn rotation_amount(b: &BigInt, range: &BitRange) -> Option<u64> {
    let width = u64::from(range.bit_width());
    if width == 0 {
        return None;
    }
    let (r, _) = op_mod(b, &BigInt::from(width), range);
    r.to_u64()
}

#[inline(always)]
pub fn op_rol(a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
    let Some(amount) = rotation_amount(b, range) else {
        return (BigInt::zero(), false);
    };
    let width = u64::from(range.bit_width());
    let pattern = range.to_unsigned(a);
    let mask = range.modulus() - BigInt::one();
    (((&pattern << amount) | (&pattern >> (width - amount))) & mask, false)
}

#[inline(always)]
pub fn op_ror(a: &BigInt, b: &BigInt, range: &BitRange) -> (BigInt, bool) {
    let Some(amount) = rotation_amount(b, range) else {
        return (BigInt::zero(), false);
    };
    let width = u64::from(range.bit_width());
    let pattern = range.to_unsigned(a);
    let mask = range.modulus() - BigInt::one();
    (((&pattern >> amount) | (&pattern << (width - amount))) & mask, false)
}
