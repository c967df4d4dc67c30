extern crate std;

use core::cell::{Cell, RefCell};
use embassy_time::{Duration, Instant};
use embedded_hal::digital::{Error, ErrorType, InputPin};
use std::rc::Rc;
use std::vec::Vec;

use crate::SwitchInputs;

#[derive(Debug, Clone, Copy)]
struct Pulse {
    switch: usize,
    start: Instant,
    end: Instant,
}

/// Switches that go down and up on a schedule of the simulated clock.
#[derive(Clone)]
pub struct ScriptedSwitches {
    count: usize,
    pulses: Rc<RefCell<Vec<Pulse>>>,
}

impl ScriptedSwitches {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            pulses: Rc::default(),
        }
    }

    /// Hold `switch` down from `at_ms` for `for_ms` milliseconds.
    pub fn pulse(&self, switch: usize, at_ms: u64, for_ms: u64) {
        let start = Instant::from_millis(at_ms);
        self.pulses.borrow_mut().push(Pulse {
            switch,
            start,
            end: start + Duration::from_millis(for_ms),
        });
    }

    /// A clean press starting now.
    pub fn press(&self, switch: usize, for_ms: u64) {
        self.pulse(switch, Instant::now().as_millis(), for_ms);
    }
}

impl SwitchInputs for ScriptedSwitches {
    fn switch_count(&self) -> usize {
        self.count
    }

    fn is_asserted(&mut self, switch: usize) -> bool {
        let now = Instant::now();
        self.pulses
            .borrow()
            .iter()
            .any(|p| p.switch == switch && p.start <= now && now < p.end)
    }
}

#[derive(Debug)]
pub struct TestError;

impl Error for TestError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// An input pin whose level the test sets.
#[derive(Clone, Default)]
pub struct Pin(Rc<Cell<Option<bool>>>);

impl Pin {
    pub fn high() -> Self {
        Self(Rc::new(Cell::new(Some(true))))
    }

    /// Reads fail until a level is set.
    pub fn floating() -> Self {
        Self::default()
    }

    pub fn set_low(&self) {
        self.0.set(Some(false));
    }

    pub fn set_high(&self) {
        self.0.set(Some(true));
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.get().ok_or(TestError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.get().map(|high| !high).ok_or(TestError)
    }
}
