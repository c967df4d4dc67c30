use switchbox_common::keycodes::usage;

use crate::{
    add_key_bit,
    hid::{HidSink, ReportWriter},
    warn,
};

const KEYBOARD_REPORT_ID: u8 = 6;
const MOUSE_REPORT_ID: u8 = 2;
const CONSUMER_REPORT_ID: u8 = 4;

/// Turns [HidSink] calls into keyboard (NKRO bitmap), mouse and consumer control reports.
pub struct Reporter<W: ReportWriter> {
    writer: W,
    keyboard_report: [u8; crate::KEY_BITS_SIZE + 2],
    mouse_buttons: u8,
}

impl<W: ReportWriter> Reporter<W> {
    pub fn new(writer: W) -> Self {
        let mut keyboard_report = [0; crate::KEY_BITS_SIZE + 2];
        keyboard_report[0] = KEYBOARD_REPORT_ID;
        Self {
            writer,
            keyboard_report,
            mouse_buttons: 0,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    async fn write_report(&mut self, report: &[u8]) {
        if let Err(e) = self.writer.write_report(report).await {
            warn!("Failed to send report: {:?}", e);
        }
    }

    async fn write_keyboard_report(&mut self) {
        if let Err(e) = self.writer.write_report(&self.keyboard_report).await {
            warn!("Failed to send report: {:?}", e);
        }
    }

    async fn write_mouse_report(&mut self, wheel: i8) {
        self.write_report(&[MOUSE_REPORT_ID, self.mouse_buttons, 0, 0, wheel as u8, 0])
            .await;
    }

    fn add_key(&mut self, key: u8) {
        if usage::is_modifier(key) {
            self.keyboard_report[1] |= 1 << (key - usage::MODIFIER_MIN);
        } else if key >= usage::KEYBOARD_MIN {
            add_key_bit(&mut self.keyboard_report[2..], key);
        }
    }
}

impl<W: ReportWriter> HidSink for Reporter<W> {
    async fn press_keys(&mut self, codes: &[u8]) {
        for &key in codes {
            self.add_key(key);
        }
        self.write_keyboard_report().await;
    }

    async fn release_all_keys(&mut self) {
        self.keyboard_report.iter_mut().skip(1).for_each(|b| *b = 0);
        self.write_keyboard_report().await;
    }

    async fn press_mouse_buttons(&mut self, mask: u8) {
        self.mouse_buttons |= mask;
        self.write_mouse_report(0).await;
    }

    async fn release_all_mouse_buttons(&mut self) {
        self.mouse_buttons = 0;
        self.write_mouse_report(0).await;
    }

    async fn scroll(&mut self, delta: i8) {
        self.write_mouse_report(delta).await;
    }

    async fn send_consumer_control(&mut self, code: u16) {
        self.write_report(&[CONSUMER_REPORT_ID, (code & 0xff) as u8, (code >> 8) as u8])
            .await;
        self.write_report(&[CONSUMER_REPORT_ID, 0, 0]).await;
    }
}

#[cfg(test)]
#[path = "key_reporter_test.rs"]
mod test;
