use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;

/// Raw switch levels, sampled on demand.
pub trait SwitchInputs {
    fn switch_count(&self) -> usize;

    /// True while `switch` is held down.
    fn is_asserted(&mut self, switch: usize) -> bool;
}

/// Switches wired to ground with pull-ups; a low pin is a pressed switch.
impl<P: InputPin, const N: usize> SwitchInputs for [P; N] {
    fn switch_count(&self) -> usize {
        N
    }

    fn is_asserted(&mut self, switch: usize) -> bool {
        self.get_mut(switch)
            .is_some_and(|pin| pin.is_low().unwrap_or(false))
    }
}

/// Debounces presses and waits out releases.
pub struct SwitchScanner<I: SwitchInputs> {
    inputs: I,
    settle: Duration,
    release_poll: Duration,
}

impl<I: SwitchInputs> SwitchScanner<I> {
    pub fn new(inputs: I, settle: Duration, release_poll: Duration) -> Self {
        Self {
            inputs,
            settle,
            release_poll,
        }
    }

    pub fn switch_count(&self) -> usize {
        self.inputs.switch_count()
    }

    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// A press only counts if the switch is still down once the settle time has passed.
    pub async fn confirm_press(&mut self, switch: usize) -> bool {
        if !self.inputs.is_asserted(switch) {
            return false;
        }
        Timer::after(self.settle).await;
        self.inputs.is_asserted(switch)
    }

    pub async fn wait_release(&mut self, switch: usize) {
        while self.inputs.is_asserted(switch) {
            Timer::after(self.release_poll).await;
        }
    }

    /// Scan switches in order and return the first confirmed press, not yet released.
    pub async fn next_press(&mut self, from: usize) -> Option<usize> {
        for switch in from..self.switch_count() {
            if self.confirm_press(switch).await {
                return Some(switch);
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "switch_scanner_test.rs"]
mod test;
