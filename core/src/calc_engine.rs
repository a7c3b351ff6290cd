//! The calculator engine: registers, selectors and the operand state machine.
//!
//! ```text
//!                  digits               operator              digits            = / operator
//!  first <------------------- [idle] -----------> [underway] -----------> [typed] ----------> perform
//!   active=First                        active=Second          second entered      result in first
//!                                       editing=Second (arith/bitwise)
//!                                       editing=First  (shift/rotate, second = amount)
//! ```
//!
//! Two selectors are kept: `active` receives typed digits, `editing` is the target of the bit
//! edit keys (flip, negate, min, max, not) and of the memory keys.  They only diverge while a
//! shift or rotate is pending, so bit edits keep acting on the value being shifted rather than
//! on the amount.
//!
//! Every mutation goes through [`BitRange::normalize`], so all three registers are always
//! representable in the current configuration.  Side effects are queued as [`CalcEvent`]s and
//! collected with [`CalcEngine::take_events`].

use num_bigint::BigInt;
use num_traits::{One, Zero};
use tracing::{debug, trace, warn};

use crate::{
    calc_config::{validate_bit_width, validate_radix},
    BitRange, CalcConfig, CalcError, CalcEvent, CalcOp, MemoryOp, RegisterId, Registers,
};

#[derive(Clone, Debug)]
pub struct CalcEngine {
    regs: Registers,
    range: BitRange,
    radix: u32,

    /// Operator waiting for its right operand, kept after `=` so it can be repeated
    op: Option<CalcOp>,
    /// Register receiving typed digits
    active: RegisterId,
    /// Register targeted by bit edit and memory keys
    editing: RegisterId,

    operation_underway: bool,
    division_by_zero: bool,
    /// Next digit starts a new number instead of extending the active one
    new_round: bool,
    second_operand_entered: bool,

    events: Vec<CalcEvent>,
}

impl Default for CalcEngine {
    fn default() -> Self {
        Self::with_range(BitRange::new(crate::DEFAULT_BIT_WIDTH, true), crate::DEFAULT_RADIX)
    }
}

impl CalcEngine {
    /// Creates an engine with zeroed registers for the given configuration
    pub fn new(config: &CalcConfig) -> Result<Self, CalcError> {
        config.validate()?;
        Ok(Self::with_range(config.bit_range(), config.radix))
    }

    fn with_range(range: BitRange, radix: u32) -> Self {
        Self {
            regs: Registers::new(),
            range,
            radix,
            op: None,
            active: RegisterId::First,
            editing: RegisterId::First,
            operation_underway: false,
            division_by_zero: false,
            new_round: true,
            second_operand_entered: false,
            events: Vec::new(),
        }
    }

    /*************/
    /* Accessors */
    /*************/

    pub fn register(&self, id: RegisterId) -> &BigInt {
        &self.regs[id]
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Returns a register as text in the current radix, e.g. "-ff"
    pub fn register_string(&self, id: RegisterId) -> String {
        self.regs[id].to_str_radix(self.radix)
    }

    pub fn first_operand(&self) -> String {
        self.register_string(RegisterId::First)
    }

    pub fn second_operand(&self) -> String {
        self.register_string(RegisterId::Second)
    }

    pub fn active_operand(&self) -> &BigInt {
        &self.regs[self.active]
    }

    pub fn active(&self) -> RegisterId {
        self.active
    }

    pub fn editing(&self) -> RegisterId {
        self.editing
    }

    pub fn operation(&self) -> Option<CalcOp> {
        self.op
    }

    pub fn is_operation_underway(&self) -> bool {
        self.operation_underway
    }

    pub fn is_division_by_zero(&self) -> bool {
        self.division_by_zero
    }

    pub fn bit_range(&self) -> &BitRange {
        &self.range
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn config(&self) -> CalcConfig {
        CalcConfig {
            signed: self.range.is_signed(),
            bit_width: self.range.bit_width(),
            radix: self.radix,
        }
    }

    /// Drains the events queued since the last call
    pub fn take_events(&mut self) -> Vec<CalcEvent> {
        std::mem::take(&mut self.events)
    }

    /*****************/
    /* Configuration */
    /*****************/

    /// Changes the radix used to parse and print registers; values are not touched
    pub fn set_radix(&mut self, radix: u32) -> Result<(), CalcError> {
        validate_radix(radix)?;
        debug!("radix {} -> {}", self.radix, radix);
        self.radix = radix;
        self.events.push(CalcEvent::ConfigChanged);
        Ok(())
    }

    /// Changes the register width, truncating or sign-extending every register
    pub fn set_bit_width(&mut self, bit_width: u32) -> Result<(), CalcError> {
        validate_bit_width(bit_width)?;
        debug!("bit width {} -> {}", self.range.bit_width(), bit_width);
        self.range.set_bit_width(bit_width);
        self.renormalize();
        Ok(())
    }

    /// Switches between signed and unsigned interpretation, keeping the bit patterns
    pub fn set_signed(&mut self, signed: bool) {
        debug!("signed {} -> {}", self.range.is_signed(), signed);
        self.range.set_signed(signed);
        self.renormalize();
    }

    fn renormalize(&mut self) {
        for id in RegisterId::ALL {
            self.regs[id] = self.range.normalize(&self.regs[id]);
        }
        self.changed(RegisterId::First);
        self.changed(RegisterId::Second);
        self.memory_changed();
        self.events.push(CalcEvent::ConfigChanged);
    }

    /***************/
    /* Digit entry */
    /***************/

    /// Appends a digit to the active register.  A digit that would take the register out of
    /// its representable range is dropped.
    pub fn append_digit(&mut self, digit: char) -> Result<(), CalcError> {
        if self.division_by_zero {
            return Ok(());
        }
        let value = digit
            .to_digit(self.radix)
            .ok_or(CalcError::InvalidDigit { digit, radix: self.radix })?;

        let restarted = self.start_entry();

        let candidate = &self.regs[self.active] * self.radix + value;
        if self.range.normalize(&candidate) == candidate {
            trace!("digit {digit} -> {} = {candidate}", self.active);
            self.regs[self.active] = candidate;
            self.changed(self.active);
        } else {
            trace!("digit {digit} rejected, {candidate} out of {}", self.range);
            if restarted {
                // The register was zeroed for the new number even though the digit was dropped
                self.changed(self.active);
            }
        }
        Ok(())
    }

    /// Removes the least significant digit of the active register
    pub fn remove_digit(&mut self) {
        if self.division_by_zero {
            return;
        }
        if self.operation_underway && !self.second_operand_entered {
            return;
        }
        let active = self.active;
        self.regs[active] = &self.regs[active] / self.radix;
        self.changed(active);
    }

    /// Replaces the active register with a number written in the current radix
    pub fn set_active_operand(&mut self, text: &str) -> Result<(), CalcError> {
        let parsed = BigInt::parse_bytes(text.trim().as_bytes(), self.radix).ok_or_else(|| {
            CalcError::InvalidNumber { text: text.to_string(), radix: self.radix }
        })?;
        self.regs[self.active] = self.range.normalize(&parsed);
        if self.active == RegisterId::Second {
            self.second_operand_entered = true;
        }
        self.changed(self.active);
        Ok(())
    }

    /// Zeroes the active register when a new number starts, returning true if it did
    fn start_entry(&mut self) -> bool {
        if !self.new_round {
            return false;
        }
        self.new_round = false;
        self.regs[self.active] = BigInt::zero();
        if self.active == RegisterId::Second {
            self.second_operand_entered = true;
        }
        true
    }

    /************/
    /* Clearing */
    /************/

    /// Zeroes the active register and releases the division by zero latch
    pub fn clear_entry(&mut self) {
        self.regs[self.active] = BigInt::zero();
        self.changed(self.active);
        self.division_by_zero = false;
    }

    /// Zeroes both operands, drops the pending operator and resets every flag
    pub fn clear(&mut self) {
        self.regs[RegisterId::First] = BigInt::zero();
        self.regs[RegisterId::Second] = BigInt::zero();
        self.op = None;
        self.perform_operation();
        self.changed(RegisterId::First);
        self.changed(RegisterId::Second);
        self.division_by_zero = false;
    }

    /*************/
    /* Operators */
    /*************/

    /// Enters a binary operator.  A previously typed right operand is applied first, so
    /// `3 + 4 * 2` evaluates `3 + 4` when `*` is pressed.
    pub fn enter_operation(&mut self, op: CalcOp) {
        if self.division_by_zero {
            return;
        }
        let previous = self.op;
        if self.second_operand_entered {
            self.perform_operation();
        }

        debug!("enter {op}");
        self.op = Some(op);
        if op.is_shift_or_rotate() {
            self.regs[RegisterId::Second] = self.range.normalize(&BigInt::one());
            if previous == Some(op) && self.operation_underway {
                // Same shift pressed twice: apply it right away by the default amount
                self.perform_operation();
            }
            self.editing = RegisterId::First;
        } else {
            self.regs[RegisterId::Second] = self.regs[RegisterId::First].clone();
            self.editing = RegisterId::Second;
        }
        self.changed(RegisterId::Second);

        self.new_round = true;
        self.operation_underway = true;
        self.active = RegisterId::Second;
    }

    /// Executes the pending operator on first and second, leaving the result in first (`=`)
    pub fn perform_operation(&mut self) {
        self.new_round = true;
        self.second_operand_entered = false;
        self.operation_underway = false;
        self.active = RegisterId::First;
        self.editing = RegisterId::First;

        let Some(op) = self.op else {
            return;
        };

        let first = &self.regs[RegisterId::First];
        let second = &self.regs[RegisterId::Second];
        let (value, undefined) = op.call(first, second, &self.range);
        if undefined {
            warn!("division by zero: {first} {op} {second}");
            self.events.push(CalcEvent::DivisionByZero);
            self.division_by_zero = true;
            self.op = None;
            return;
        }

        let result = self.range.normalize(&value);
        debug!("{first} {op} {second} = {result}");
        self.regs[RegisterId::First] = result;
        self.changed(RegisterId::First);
    }

    /************/
    /* Bit edit */
    /************/

    /// Flips bit `pos` of the editing register
    pub fn flip_bit(&mut self, pos: u32) {
        let target = self.editing;
        if pos >= self.range.bit_width() {
            // Bits past the width are dropped by normalization anyway
            return;
        }
        let flipped = &self.regs[target] ^ (BigInt::one() << pos);
        self.regs[target] = self.range.normalize(&flipped);
        self.changed(target);
    }

    /// Changes the sign of the editing register.  The most negative value has no positive
    /// counterpart and is left alone.
    pub fn negate(&mut self) {
        let target = self.editing;
        if self.regs[target] == -self.range.half_range() {
            return;
        }
        self.regs[target] = self.range.normalize(&-&self.regs[target]);
        self.changed(target);
    }

    pub fn set_max(&mut self) {
        let target = self.editing;
        self.regs[target] = self.range.max_value();
        self.changed(target);
    }

    pub fn set_min(&mut self) {
        let target = self.editing;
        self.regs[target] = self.range.min_value();
        self.changed(target);
    }

    /// Bitwise complement of the editing register
    pub fn not(&mut self) {
        let target = self.editing;
        self.regs[target] = self.range.normalize(&!&self.regs[target]);
        self.changed(target);
    }

    /**********/
    /* Memory */
    /**********/

    /// MS: copies the editing register into memory
    pub fn memory_store(&mut self) {
        self.regs[RegisterId::Memory] = self.regs[self.editing].clone();
        self.memory_changed();
    }

    /// MR: copies memory into the active register
    pub fn memory_recall(&mut self) {
        let active = self.active;
        self.regs[active] = self.range.normalize(&self.regs[RegisterId::Memory]);
        self.changed(active);
    }

    /// MC: zeroes memory
    pub fn memory_clear(&mut self) {
        self.regs[RegisterId::Memory] = BigInt::zero();
        self.memory_changed();
    }

    /// M+ and M-: accumulates the editing register into memory
    pub fn memory_accumulate(&mut self, op: MemoryOp) {
        let memory = &self.regs[RegisterId::Memory];
        let operand = &self.regs[self.editing];
        let value = match op {
            MemoryOp::Add => memory + operand,
            MemoryOp::Sub => memory - operand,
        };
        self.regs[RegisterId::Memory] = self.range.normalize(&value);
        self.memory_changed();
    }

    /**********/
    /* Events */
    /**********/

    fn changed(&mut self, id: RegisterId) {
        self.events.push(CalcEvent::RegisterChanged(id, self.regs[id].clone()));
    }

    fn memory_changed(&mut self) {
        let non_zero = !self.regs[RegisterId::Memory].is_zero();
        self.events.push(CalcEvent::MemoryIndicator(non_zero));
    }
}
