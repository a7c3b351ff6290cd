//! Keys and the [`Calculator`] front door, which feeds keys to a [`CalcEngine`] and delivers
//! the resulting notifications to a [`CalcDisplay`].

use tracing::trace;

use crate::{CalcConfig, CalcDisplay, CalcEngine, CalcError, CalcOp, MemoryOp};

/// A single input to the calculator, already decoded from whatever the user pressed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalcKey {
    Digit(char),
    Backspace,
    Operation(CalcOp),
    Equals,
    Clear,
    ClearEntry,
    Negate,
    Not,
    Min,
    Max,
    FlipBit(u32),
    MemoryStore,
    MemoryRecall,
    MemoryClear,
    MemoryAccumulate(MemoryOp),
    SetRadix(u32),
    SetBitWidth(u32),
    SetSigned(bool),
    SetOperand(String),
}

pub struct Calculator<D: CalcDisplay> {
    engine: CalcEngine,
    display: D,
}

impl<D: CalcDisplay> Calculator<D> {
    pub fn new(config: &CalcConfig, display: D) -> Result<Self, CalcError> {
        Ok(Self { engine: CalcEngine::new(config)?, display })
    }

    pub fn engine(&self) -> &CalcEngine {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the engine and the display at once, so a display can redraw from engine state
    pub fn engine_and_display_mut(&mut self) -> (&CalcEngine, &mut D) {
        (&self.engine, &mut self.display)
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Executes a key and notifies the display of every resulting change
    pub fn press(&mut self, key: CalcKey) -> Result<(), CalcError> {
        trace!("key {key:?}");
        let result = self.execute(key);
        for event in self.engine.take_events() {
            self.display.notify(&event);
        }
        result
    }

    /// Executes a sequence of keys, stopping at the first rejected one
    pub fn press_all<I: IntoIterator<Item = CalcKey>>(&mut self, keys: I) -> Result<(), CalcError> {
        keys.into_iter().try_for_each(|key| self.press(key))
    }

    fn execute(&mut self, key: CalcKey) -> Result<(), CalcError> {
        let engine = &mut self.engine;
        match key {
            CalcKey::Digit(digit) => engine.append_digit(digit)?,
            CalcKey::Backspace => engine.remove_digit(),
            CalcKey::Operation(op) => engine.enter_operation(op),
            CalcKey::Equals => engine.perform_operation(),
            CalcKey::Clear => engine.clear(),
            CalcKey::ClearEntry => engine.clear_entry(),
            CalcKey::Negate => engine.negate(),
            CalcKey::Not => engine.not(),
            CalcKey::Min => engine.set_min(),
            CalcKey::Max => engine.set_max(),
            CalcKey::FlipBit(pos) => engine.flip_bit(pos),
            CalcKey::MemoryStore => engine.memory_store(),
            CalcKey::MemoryRecall => engine.memory_recall(),
            CalcKey::MemoryClear => engine.memory_clear(),
            CalcKey::MemoryAccumulate(op) => engine.memory_accumulate(op),
            CalcKey::SetRadix(radix) => engine.set_radix(radix)?,
            CalcKey::SetBitWidth(bits) => engine.set_bit_width(bits)?,
            CalcKey::SetSigned(signed) => engine.set_signed(signed),
            CalcKey::SetOperand(text) => engine.set_active_operand(&text)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::{CalcEvent, RecordingDisplay, RegisterId};

    fn calculator(signed: bool, bits: u32) -> Calculator<RecordingDisplay> {
        Calculator::new(&CalcConfig::new(signed, bits), RecordingDisplay::default()).unwrap()
    }

    #[test]
    fn digits_notify_the_active_register() {
        let mut calc = calculator(true, 8);
        calc.press_all([CalcKey::Digit('1'), CalcKey::Digit('2')]).unwrap();
        assert_eq!(
            calc.display().events,
            vec![
                CalcEvent::RegisterChanged(RegisterId::First, BigInt::from(1)),
                CalcEvent::RegisterChanged(RegisterId::First, BigInt::from(12)),
            ]
        );
    }

    #[test]
    fn rejected_digit_is_silent() {
        let mut calc = calculator(true, 4);
        calc.press(CalcKey::Digit('7')).unwrap();
        let before = calc.display().events.len();
        calc.press(CalcKey::Digit('1')).unwrap();
        assert_eq!(calc.display().events.len(), before);
        assert_eq!(*calc.engine().register(RegisterId::First), BigInt::from(7));
    }

    #[test]
    fn rejected_first_digit_still_shows_the_cleared_register() {
        let mut calc = calculator(true, 4);
        calc.press_all([CalcKey::Digit('5'), CalcKey::Operation(CalcOp::Add)]).unwrap();
        let before = calc.display().events.len();

        calc.press(CalcKey::Digit('9')).unwrap();
        assert_eq!(*calc.engine().register(RegisterId::Second), BigInt::from(0));
        let events = calc.into_display().events;
        assert_eq!(
            events[before..],
            [CalcEvent::RegisterChanged(RegisterId::Second, BigInt::from(0))]
        );
    }

    #[test]
    fn division_by_zero_is_notified_once() {
        let mut calc = calculator(true, 16);
        calc.press_all([
            CalcKey::Digit('5'),
            CalcKey::Operation(CalcOp::Div),
            CalcKey::Digit('0'),
            CalcKey::Equals,
            CalcKey::Digit('3'),
            CalcKey::Digit('4'),
        ])
        .unwrap();
        let count = calc
            .display()
            .events
            .iter()
            .filter(|e| matches!(e, CalcEvent::DivisionByZero))
            .count();
        assert_eq!(count, 1);
        assert!(calc.engine().is_division_by_zero());
    }

    #[test]
    fn memory_indicator_follows_memory() {
        let mut calc = calculator(true, 16);
        calc.press_all([
            CalcKey::Digit('9'),
            CalcKey::MemoryStore,
            CalcKey::MemoryAccumulate(MemoryOp::Sub),
            CalcKey::MemoryAccumulate(MemoryOp::Add),
            CalcKey::MemoryClear,
        ])
        .unwrap();
        let indicators: Vec<bool> = calc
            .display()
            .events
            .iter()
            .filter_map(|e| match e {
                CalcEvent::MemoryIndicator(on) => Some(*on),
                _ => None,
            })
            .collect();
        assert_eq!(indicators, vec![true, false, true, false]);
    }

    #[test]
    fn config_keys_request_a_redraw() {
        let mut calc = calculator(true, 16);
        calc.press(CalcKey::SetRadix(16)).unwrap();
        assert_eq!(calc.display().events, vec![CalcEvent::ConfigChanged]);
        calc.press(CalcKey::SetSigned(false)).unwrap();
        assert_eq!(calc.display().events.last(), Some(&CalcEvent::ConfigChanged));
    }

    #[test]
    fn invalid_keys_are_reported() {
        let mut calc = calculator(true, 16);
        assert_eq!(calc.press(CalcKey::SetRadix(40)), Err(CalcError::InvalidRadix(40)));
        assert_eq!(
            calc.press(CalcKey::Digit('z')),
            Err(CalcError::InvalidDigit { digit: 'z', radix: 10 })
        );
        assert!(calc.press(CalcKey::SetOperand("12x".into())).is_err());
        assert_eq!(calc.engine().radix(), 10);
        assert!(calc.display().events.is_empty());
    }
}
