use alloc::{collections::BTreeMap, string::String};
use core::fmt;

use crate::{
    event::{Event, HoldTarget, ScrollDirection},
    keycodes::{self, mouse_button, usage},
};

/// The table a vocabulary name lives in. Lookup order is the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    Alias,
    Keyboard,
    Consumer,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub table: Table,
    pub event: Event,
}

/// Every name the codec understands. Built once and owned by an [EventCodec].
pub struct EventRegistry {
    renames: BTreeMap<&'static str, &'static str>,
    keyboard: BTreeMap<&'static str, u8>,
    consumer: BTreeMap<&'static str, u16>,
    special: BTreeMap<&'static str, Event>,
}

impl EventRegistry {
    pub fn standard() -> Self {
        let mut keyboard = BTreeMap::new();
        let mut ins = |names: &'static str, code: u8| {
            for name in names.split('/') {
                assert!(
                    keyboard.insert(name, code).is_none(),
                    "event name already added {name}"
                );
            }
        };
        for (i, names) in keycodes::KEYBOARD_NAMES.split_whitespace().enumerate() {
            ins(names, usage::KEYBOARD_MIN + i as u8);
        }
        for (i, names) in keycodes::MODIFIER_NAMES.split_whitespace().enumerate() {
            ins(names, usage::MODIFIER_MIN + i as u8);
        }

        let mut special = BTreeMap::new();
        special.insert("LEFT_BUTTON", Event::MouseButton(mouse_button::LEFT));
        special.insert("MIDDLE_BUTTON", Event::MouseButton(mouse_button::MIDDLE));
        special.insert("RIGHT_BUTTON", Event::MouseButton(mouse_button::RIGHT));
        special.insert("SCROLL_IN", Event::MouseScroll(ScrollDirection::In));
        special.insert("SCROLL_OUT", Event::MouseScroll(ScrollDirection::Out));
        special.insert("HOLD_MOUSE", Event::ModifierHold(HoldTarget::Mouse));
        special.insert("HOLD_KEYS", Event::ModifierHold(HoldTarget::Keyboard));

        Self {
            renames: keycodes::RENAMES.iter().copied().collect(),
            keyboard,
            consumer: keycodes::CONSUMER_CODES.iter().copied().collect(),
            special,
        }
    }

    /// Resolve an upper case name. Aliases are followed once.
    pub fn lookup(&self, name: &str) -> Option<Event> {
        let name = self.renames.get(name).copied().unwrap_or(name);
        if let Some(code) = self.keyboard.get(name) {
            Some(Event::Keyboard(*code))
        } else if let Some(code) = self.consumer.get(name) {
            Some(Event::ConsumerControl(*code))
        } else {
            self.special.get(name).copied()
        }
    }

    /// All names with the event each resolves to, grouped by table.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        let aliases = self.renames.keys().filter_map(|&name| {
            self.lookup(name).map(|event| Entry {
                name,
                table: Table::Alias,
                event,
            })
        });
        let keyboard = self.keyboard.iter().map(|(&name, &code)| Entry {
            name,
            table: Table::Keyboard,
            event: Event::Keyboard(code),
        });
        let consumer = self.consumer.iter().map(|(&name, &code)| Entry {
            name,
            table: Table::Consumer,
            event: Event::ConsumerControl(code),
        });
        let special = self.special.iter().map(|(&name, &event)| Entry {
            name,
            table: Table::Special,
            event,
        });
        aliases.chain(keyboard).chain(consumer).chain(special)
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown event '{}'", self.0)
    }
}

/// Turns mapping file tokens such as `ctrl`, `x` or `left_button` into [Event]s.
#[derive(Default)]
pub struct EventCodec {
    registry: EventRegistry,
}

impl EventCodec {
    pub fn new(registry: EventRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// Case insensitive.
    ///
    /// ```
    /// use switchbox_common::{Event, EventCodec};
    ///
    /// let codec = EventCodec::default();
    /// assert_eq!(codec.encode("shift"), Ok(Event::Keyboard(0xe1)));
    /// ```
    pub fn encode(&self, token: &str) -> Result<Event, UnknownEvent> {
        let name = token.to_ascii_uppercase();
        self.registry
            .lookup(&name)
            .ok_or_else(|| UnknownEvent(String::from(token)))
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod test;
