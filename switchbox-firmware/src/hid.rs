use embassy_usb::driver::{Endpoint, EndpointError, EndpointIn};

/// The HID operations an [EventExecutor](crate::EventExecutor) drives.
#[allow(async_fn_in_trait)]
pub trait HidSink {
    /// Press every code at once; modifiers (0xe0..=0xe7) included.
    async fn press_keys(&mut self, codes: &[u8]);
    async fn release_all_keys(&mut self);
    /// `mask` is an OR of [mouse_button](switchbox_common::keycodes::mouse_button) bits.
    async fn press_mouse_buttons(&mut self, mask: u8);
    async fn release_all_mouse_buttons(&mut self);
    /// Negative scrolls in (up), positive out (down).
    async fn scroll(&mut self, delta: i8);
    async fn send_consumer_control(&mut self, code: u16);
}

/// Somewhere to put a finished HID report, first byte the report id.
#[allow(async_fn_in_trait)]
pub trait ReportWriter {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), EndpointError>;
}

pub struct HidWriter<E: EndpointIn, const N: usize> {
    ep_in: E,
}

impl<E: EndpointIn, const N: usize> HidWriter<E, N> {
    pub fn new(ep_in: E) -> Self {
        Self { ep_in }
    }

    /// Writes `report` to its interrupt endpoint.
    pub async fn write(&mut self, report: &[u8]) -> Result<(), EndpointError> {
        assert!(report.len() <= N);

        let max_packet_size = usize::from(self.ep_in.info().max_packet_size);
        let zlp_needed = report.len() < N && report.len() % max_packet_size == 0;
        for chunk in report.chunks(max_packet_size) {
            self.ep_in.write(chunk).await?;
        }

        if zlp_needed {
            self.ep_in.write(&[]).await?;
        }

        Ok(())
    }
}

impl<E: EndpointIn, const N: usize> ReportWriter for HidWriter<E, N> {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), EndpointError> {
        self.write(report).await
    }
}

#[cfg(test)]
#[path = "hid_test.rs"]
mod test;
