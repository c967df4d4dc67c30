//! HID usage ids and the name tables the [EventCodec](crate::EventCodec) is built from.
//!
//! Names are upper case; tokens are upper cased before lookup.

pub mod usage {
    pub const KEYBOARD_MIN: u8 = 0x04;
    pub const KEYBOARD_A: u8 = 0x04;
    pub const KEYBOARD_MAX: u8 = 0x73;
    pub const MODIFIER_MIN: u8 = 0xe0;
    pub const MODIFIER_MAX: u8 = 0xe7;

    pub fn is_modifier(code: u8) -> bool {
        (MODIFIER_MIN..=MODIFIER_MAX).contains(&code)
    }
}

pub mod mouse_button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const MIDDLE: u8 = 4;
}

/// Keyboard page names in usage order starting at [usage::KEYBOARD_MIN]. Alternative names for
/// the same usage are separated by `/`.
pub const KEYBOARD_NAMES: &str = r#"
A B C D E F G H I J K L M N O P Q R S T U V W X Y Z
ONE/1 TWO/2 THREE/3 FOUR/4 FIVE/5 SIX/6 SEVEN/7 EIGHT/8 NINE/9 ZERO/0
ENTER/RETURN
ESCAPE
BACKSPACE
TAB
SPACEBAR/SPACE
MINUS
EQUALS
LEFT_BRACKET
RIGHT_BRACKET
BACKSLASH
POUND
SEMICOLON
QUOTE
GRAVE_ACCENT
COMMA
PERIOD
FORWARD_SLASH
CAPS_LOCK
F1 F2 F3 F4 F5 F6 F7 F8 F9 F10 F11 F12
PRINT_SCREEN
SCROLL_LOCK
PAUSE
INSERT
HOME
PAGE_UP
DELETE
END
PAGE_DOWN
RIGHT_ARROW LEFT_ARROW DOWN_ARROW UP_ARROW
KEYPAD_NUMLOCK
KEYPAD_FORWARD_SLASH KEYPAD_ASTERISK KEYPAD_MINUS KEYPAD_PLUS KEYPAD_ENTER
KEYPAD_ONE KEYPAD_TWO KEYPAD_THREE KEYPAD_FOUR KEYPAD_FIVE
KEYPAD_SIX KEYPAD_SEVEN KEYPAD_EIGHT KEYPAD_NINE KEYPAD_ZERO
KEYPAD_PERIOD
KEYPAD_BACKSLASH
APPLICATION
POWER
KEYPAD_EQUALS
F13 F14 F15 F16 F17 F18 F19 F20 F21 F22 F23 F24
"#;

/// Modifier names in usage order starting at [usage::MODIFIER_MIN].
pub const MODIFIER_NAMES: &str = r#"
LEFT_CONTROL/CONTROL
LEFT_SHIFT/SHIFT
LEFT_ALT/ALT
LEFT_GUI/GUI
RIGHT_CONTROL
RIGHT_SHIFT
RIGHT_ALT
RIGHT_GUI
"#;

pub const CONSUMER_CODES: &[(&str, u16)] = &[
    // 15.5 Display Controls
    ("BRIGHTNESS_INCREMENT", 0x06f),
    ("BRIGHTNESS_DECREMENT", 0x070),
    // 15.7 Transport Controls
    ("RECORD", 0x0b2),
    ("FAST_FORWARD", 0x0b3),
    ("REWIND", 0x0b4),
    ("SCAN_NEXT_TRACK", 0x0b5),
    ("SCAN_PREVIOUS_TRACK", 0x0b6),
    ("STOP", 0x0b7),
    ("EJECT", 0x0b8),
    ("PLAY_PAUSE", 0x0cd),
    // 15.9.1 Audio Controls - Volume
    ("MUTE", 0x0e2),
    ("VOLUME_INCREMENT", 0x0e9),
    ("VOLUME_DECREMENT", 0x0ea),
    // 15.15 Application Launch Buttons
    ("AL_EMAIL", 0x18a),
    ("AL_CALCULATOR", 0x192),
    ("AL_LOCAL_BROWSER", 0x194),
    // 15.16 Generic GUI Application Controls
    ("AC_SEARCH", 0x221),
    ("AC_HOME", 0x223),
    ("AC_BACK", 0x224),
    ("AC_FORWARD", 0x225),
    ("AC_REFRESH", 0x227),
];

/// Convenience names that stand for another vocabulary name.
pub const RENAMES: &[(&str, &str)] = &[
    ("CMD", "GUI"),
    ("COMMAND", "GUI"),
    ("WINDOWS", "GUI"),
    ("WIN", "GUI"),
    ("CTRL", "CONTROL"),
    ("OPTION", "ALT"),
    ("ESC", "ESCAPE"),
    ("DEL", "DELETE"),
    ("CAPSLOCK", "CAPS_LOCK"),
    ("PAGEUP", "PAGE_UP"),
    ("PAGEDOWN", "PAGE_DOWN"),
    ("LEFTARROW", "LEFT_ARROW"),
    ("RIGHTARROW", "RIGHT_ARROW"),
    ("UPARROW", "UP_ARROW"),
    ("DOWNARROW", "DOWN_ARROW"),
    ("LEFT", "LEFT_BUTTON"),
    ("MIDDLE", "MIDDLE_BUTTON"),
    ("RIGHT", "RIGHT_BUTTON"),
    ("LEFTCLICK", "LEFT_BUTTON"),
    ("MIDDLECLICK", "MIDDLE_BUTTON"),
    ("RIGHTCLICK", "RIGHT_BUTTON"),
    ("SCROLLIN", "SCROLL_IN"),
    ("SCROLLOUT", "SCROLL_OUT"),
];
