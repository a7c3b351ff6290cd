//! Notifications produced by the engine and the collaborator that consumes them

use num_bigint::BigInt;

use crate::RegisterId;

/// Side effect recorded by [`crate::CalcEngine`] while executing a key.
///
/// The engine only queues events; [`crate::Calculator`] delivers them to a [`CalcDisplay`] once
/// the engine call has returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalcEvent {
    RegisterChanged(RegisterId, BigInt),
    ConfigChanged,
    DivisionByZero,
    MemoryIndicator(bool),
}

/// Presentation side of the calculator
pub trait CalcDisplay {
    /// A register got a new value
    fn register_changed(&mut self, id: RegisterId, value: &BigInt);
    /// Radix, bit width or signedness changed; everything should be redrawn
    fn config_changed(&mut self);
    /// A division by zero was attempted and the engine is now latched
    fn division_by_zero(&mut self);
    /// The memory register became zero (`false`) or non-zero (`true`)
    fn memory_indicator(&mut self, non_zero: bool);

    fn notify(&mut self, event: &CalcEvent) {
        match event {
            CalcEvent::RegisterChanged(id, value) => self.register_changed(*id, value),
            CalcEvent::ConfigChanged => self.config_changed(),
            CalcEvent::DivisionByZero => self.division_by_zero(),
            CalcEvent::MemoryIndicator(non_zero) => self.memory_indicator(*non_zero),
        }
    }
}

/// Display that ignores every notification
#[derive(Default, Debug, Clone, Copy)]
pub struct NullDisplay;

impl CalcDisplay for NullDisplay {
    fn register_changed(&mut self, _id: RegisterId, _value: &BigInt) {}
    fn config_changed(&mut self) {}
    fn division_by_zero(&mut self) {}
    fn memory_indicator(&mut self, _non_zero: bool) {}
}

/// Display that keeps every notification, mostly useful to inspect the engine from tests
#[derive(Default, Debug, Clone)]
pub struct RecordingDisplay {
    pub events: Vec<CalcEvent>,
}

impl CalcDisplay for RecordingDisplay {
    fn register_changed(&mut self, id: RegisterId, value: &BigInt) {
        self.events.push(CalcEvent::RegisterChanged(id, value.clone()));
    }

    fn config_changed(&mut self) {
        self.events.push(CalcEvent::ConfigChanged);
    }

    fn division_by_zero(&mut self) {
        self.events.push(CalcEvent::DivisionByZero);
    }

    fn memory_indicator(&mut self, non_zero: bool) {
        self.events.push(CalcEvent::MemoryIndicator(non_zero));
    }
}
