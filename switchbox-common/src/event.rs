use alloc::vec::Vec;
use core::fmt;

use crate::keycodes::mouse_button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Wheel towards the user; scrolls up/in.
    In,
    /// Wheel away from the user; scrolls down/out.
    Out,
}
impl ScrollDirection {
    pub fn delta(self) -> i8 {
        match self {
            ScrollDirection::In => -1,
            ScrollDirection::Out => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldTarget {
    Keyboard,
    Mouse,
}

/// One decoded mapping token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// HID keyboard page usage id, modifiers included (0xe0..=0xe7).
    Keyboard(u8),
    /// HID consumer page usage id.
    ConsumerControl(u16),
    /// Mouse button bit mask; see [mouse_button].
    MouseButton(u8),
    MouseScroll(ScrollDirection),
    /// Suppress the release that normally ends an event group.
    ModifierHold(HoldTarget),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Event::Keyboard(code) => write!(f, "key:{code:#04x}"),
            Event::ConsumerControl(code) => write!(f, "consumer:{code:#05x}"),
            Event::MouseButton(mask) => match mask {
                mouse_button::LEFT => f.write_str("mouse:left"),
                mouse_button::RIGHT => f.write_str("mouse:right"),
                mouse_button::MIDDLE => f.write_str("mouse:middle"),
                mask => write!(f, "mouse:{mask:#04x}"),
            },
            Event::MouseScroll(ScrollDirection::In) => f.write_str("scroll:in"),
            Event::MouseScroll(ScrollDirection::Out) => f.write_str("scroll:out"),
            Event::ModifierHold(HoldTarget::Keyboard) => f.write_str("hold:keys"),
            Event::ModifierHold(HoldTarget::Mouse) => f.write_str("hold:mouse"),
        }
    }
}

/// Events asserted together as one chord, e.g. `ctrl-shift-k`.
///
/// Never empty; the compiler rejects empty groups before one is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGroup(Vec<Event>);

impl EventGroup {
    pub fn new(events: Vec<Event>) -> Option<Self> {
        if events.is_empty() {
            None
        } else {
            Some(Self(events))
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.0
    }

    pub fn holds(&self, target: HoldTarget) -> bool {
        self.0.contains(&Event::ModifierHold(target))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EventGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str("-")?;
            }
            write!(f, "{event}")?;
        }
        Ok(())
    }
}
