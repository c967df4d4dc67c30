use alloc::vec::Vec;

use switchbox_common::{Event, EventGroup, HoldTarget, Shortcut};

use crate::{debug, hid::HidSink};

/// Plays event groups through a [HidSink].
pub struct EventExecutor<S: HidSink> {
    sink: S,
}

impl<S: HidSink> EventExecutor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Run each group of `shortcut` in turn; a group's releases finish before the next starts.
    pub async fn execute_shortcut(&mut self, shortcut: &Shortcut) {
        for group in shortcut.groups() {
            self.execute(group).await;
        }
    }

    /// Scroll and consumer events go out as they are met. Keys are then pressed as one chord,
    /// followed by the OR of the mouse buttons, so `shift-leftclick` is a shifted click.
    pub async fn execute(&mut self, group: &EventGroup) {
        debug!("execute group of {} events", group.len());
        let mut keys = Vec::new();
        let mut buttons = 0;
        for event in group.events() {
            match *event {
                Event::Keyboard(code) => keys.push(code),
                Event::MouseButton(mask) => buttons |= mask,
                Event::MouseScroll(direction) => self.sink.scroll(direction.delta()).await,
                Event::ConsumerControl(code) => self.sink.send_consumer_control(code).await,
                Event::ModifierHold(_) => {}
            }
        }

        if !keys.is_empty() {
            self.sink.press_keys(&keys).await;
        }
        if buttons != 0 {
            self.sink.press_mouse_buttons(buttons).await;
        }
        if !group.holds(HoldTarget::Mouse) {
            self.sink.release_all_mouse_buttons().await;
        }
        if !group.holds(HoldTarget::Keyboard) {
            self.sink.release_all_keys().await;
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod test;
