use embassy_futures::block_on;
use embassy_time::Instant;

use crate::{
    switch_test_stub::{Pin, ScriptedSwitches},
    time_driver_test_stub::set_time,
};

use super::*;

fn scanner(switches: &ScriptedSwitches) -> SwitchScanner<ScriptedSwitches> {
    SwitchScanner::new(
        switches.clone(),
        Duration::from_millis(100),
        Duration::from_millis(1),
    )
}

#[test]
fn pin_array_is_active_low() {
    let pins = [Pin::high(), Pin::high(), Pin::floating()];
    let mut inputs = pins.clone();

    assert_eq!(inputs.switch_count(), 3);
    assert!(!inputs.is_asserted(0));
    pins[1].set_low();
    assert!(inputs.is_asserted(1));
    pins[1].set_high();
    assert!(!inputs.is_asserted(1));
    assert!(!inputs.is_asserted(2));
    assert!(!inputs.is_asserted(7));
}

#[test]
fn press_confirmed_after_settle() {
    set_time(0);
    let switches = ScriptedSwitches::new(4);
    switches.pulse(2, 0, 250);
    let mut scanner = scanner(&switches);

    block_on(async {
        assert!(scanner.confirm_press(2).await);
        assert_eq!(Instant::now().as_millis(), 100);
        scanner.wait_release(2).await;
        assert_eq!(Instant::now().as_millis(), 250);
    });
}

#[test]
fn short_pulse_is_ignored() {
    set_time(0);
    let switches = ScriptedSwitches::new(4);
    switches.pulse(1, 0, 99);
    let mut scanner = scanner(&switches);

    block_on(async {
        assert!(!scanner.confirm_press(1).await);
        assert_eq!(scanner.next_press(0).await, None);
    });
}

#[test]
fn released_switch_costs_no_time() {
    set_time(5_000);
    let switches = ScriptedSwitches::new(2);
    let mut scanner = scanner(&switches);

    block_on(async {
        assert!(!scanner.confirm_press(0).await);
        scanner.wait_release(0).await;
    });
    assert_eq!(Instant::now().as_millis(), 5);
}

#[test]
fn next_press_in_scan_order() {
    set_time(0);
    let switches = ScriptedSwitches::new(4);
    switches.pulse(3, 0, 300);
    switches.pulse(1, 0, 300);
    let mut scanner = scanner(&switches);

    block_on(async {
        assert_eq!(scanner.next_press(0).await, Some(1));
        assert_eq!(scanner.next_press(2).await, Some(3));
        assert_eq!(scanner.next_press(4).await, None);
    });
}
