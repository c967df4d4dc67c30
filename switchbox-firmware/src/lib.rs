#![no_std]
extern crate alloc;

#[macro_use]
mod macros;

pub mod controller;
pub mod display;
pub mod executor;
pub mod hid;
pub mod key_reporter;
pub mod switch_scanner;

pub use controller::{ControllerConfig, ControllerState, SwitchController};
pub use display::TextDisplay;
pub use executor::EventExecutor;
pub use hid::{HidSink, HidWriter, ReportWriter};
pub use key_reporter::Reporter;
pub use switch_scanner::{SwitchInputs, SwitchScanner};

#[cfg(test)]
pub mod sink_test_stub;
#[cfg(test)]
pub mod switch_test_stub;
#[cfg(test)]
pub mod time_driver_test_stub;
#[cfg(test)]
pub mod usb_test_stub;

pub(crate) const KEY_BITS_SIZE: usize = 32;

fn add_bit<const SIZE: usize>(keys_down: &mut [u8], kc: u8) -> bool {
    let i = (kc >> 3) as usize;
    if i >= SIZE {
        crate::error!("invalid key! {}", kc);
        return false;
    }
    let bp = 1 << (kc & 7);
    let old = keys_down[i];
    keys_down[i] |= bp;
    old & bp == 0
}

fn add_key_bit(keys_down: &mut [u8], kc: u8) -> bool {
    add_bit::<KEY_BITS_SIZE>(keys_down, kc)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
