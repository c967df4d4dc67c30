extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use crate::{HidSink, TextDisplay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HidCall {
    PressKeys(Vec<u8>),
    ReleaseAllKeys,
    PressMouseButtons(u8),
    ReleaseAllMouseButtons,
    Scroll(i8),
    ConsumerControl(u16),
}

#[derive(Clone, Default)]
pub struct RecordingSink(Rc<RefCell<Vec<HidCall>>>);
impl RecordingSink {
    pub fn take(&self) -> Vec<HidCall> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn push(&self, call: HidCall) {
        self.0.borrow_mut().push(call);
    }
}

impl HidSink for RecordingSink {
    async fn press_keys(&mut self, codes: &[u8]) {
        self.push(HidCall::PressKeys(Vec::from(codes)));
    }

    async fn release_all_keys(&mut self) {
        self.push(HidCall::ReleaseAllKeys);
    }

    async fn press_mouse_buttons(&mut self, mask: u8) {
        self.push(HidCall::PressMouseButtons(mask));
    }

    async fn release_all_mouse_buttons(&mut self) {
        self.push(HidCall::ReleaseAllMouseButtons);
    }

    async fn scroll(&mut self, delta: i8) {
        self.push(HidCall::Scroll(delta));
    }

    async fn send_consumer_control(&mut self, code: u16) {
        self.push(HidCall::ConsumerControl(code));
    }
}

/// Keeps what would be on screen: everything printed since the last clear.
#[derive(Clone, Default)]
pub struct RecordingDisplay(Rc<RefCell<DisplayInner>>);

#[derive(Default)]
struct DisplayInner {
    screen: String,
    clears: usize,
}

impl RecordingDisplay {
    pub fn screen(&self) -> String {
        self.0.borrow().screen.clone()
    }

    pub fn clears(&self) -> usize {
        self.0.borrow().clears
    }
}

impl TextDisplay for RecordingDisplay {
    async fn clear(&mut self) {
        let mut inner = self.0.borrow_mut();
        inner.screen.clear();
        inner.clears += 1;
    }

    async fn print(&mut self, text: &str) {
        self.0.borrow_mut().screen.push_str(text);
    }
}
