extern crate std;

use core::{cell::Cell, task::Waker};
use embassy_time_driver::Driver;

/// A simulated clock. Time only moves when a timer is waited on, jumping straight to its expiry,
/// or when a test sets it.
struct TestTimeDriver;

impl Driver for TestTimeDriver {
    fn now(&self) -> u64 {
        NOW.get()
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        if at > NOW.get() {
            NOW.set(at);
        }
        waker.wake_by_ref();
    }
}

std::thread_local! {
    static NOW: Cell<u64> = const { Cell::new(0) };
}

embassy_time_driver::time_driver_impl!(static TIME_DRIVER: TestTimeDriver = TestTimeDriver);

pub fn set_time(t: u64) {
    NOW.set(t);
}
