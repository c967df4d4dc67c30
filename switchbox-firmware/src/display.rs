use alloc::{format, string::String};
use core::fmt::Write;

use switchbox_common::{ConfigError, Page};

pub const READY: &str = "Ready! Choose a\nshortcut and press\nthe do-it switch.";
pub const NO_SHORTCUTS: &str = "No shortcuts\non this switch!";
pub const EXECUTED: &str = " *";
pub const FIX_AND_RESET: &str = "Fix and reset.";

/// A character display. Labels may carry bracketed glyph names such as `[uparrow]`; mapping those
/// to device glyphs is the implementation's job.
#[allow(async_fn_in_trait)]
pub trait TextDisplay {
    async fn clear(&mut self);
    /// Append `text` at the cursor.
    async fn print(&mut self, text: &str);
}

/// `P<num> <label>` then every switch as `<num>:<label> `.
pub fn page_directory(page: &Page) -> String {
    let mut text = format!("P{} {}\n", page.number, page.label);
    for switch in page.switches() {
        let _ = write!(text, "{}:{} ", switch.number, switch.label);
    }
    text
}

pub fn selection(switch: usize, label: Option<&str>) -> String {
    format!("{switch} {}", label.unwrap_or(NO_SHORTCUTS))
}

pub fn fatal(err: &ConfigError) -> String {
    format!("{err}\n{FIX_AND_RESET}")
}

#[cfg(test)]
#[path = "display_test.rs"]
mod test;
